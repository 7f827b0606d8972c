//! `lulu auth` commands.

use lulu_core::SocialProvider;
use lulu_storefront::session::{CallbackOutcome, LoginForm, RegistrationForm};
use lulu_storefront::{Storefront, StorefrontError};

pub async fn register(storefront: &Storefront, form: &RegistrationForm) -> Result<(), StorefrontError> {
    let response = storefront.register(form).await?;
    println!("Registration successful! Signed in as {}", response.user.full_name());
    Ok(())
}

pub async fn login(storefront: &Storefront, form: &LoginForm) -> Result<(), StorefrontError> {
    let response = storefront.login(form).await?;
    println!("Login successful! Signed in as {}", response.user.full_name());
    Ok(())
}

pub async fn logout(storefront: &Storefront) -> Result<(), StorefrontError> {
    let response = storefront.logout().await?;
    println!("{}", response.message);
    Ok(())
}

pub async fn me(storefront: &Storefront) -> Result<(), StorefrontError> {
    let user = storefront.api().current_user().await?;
    println!("{} <{}>", user.full_name(), user.email);
    if !user.phone.is_empty() {
        println!("Phone: {}", user.phone);
    }
    Ok(())
}

pub async fn forgot_password(storefront: &Storefront, email: &str) -> Result<(), StorefrontError> {
    let response = storefront.api().forgot_password(email).await?;
    println!("{}", response.message);
    Ok(())
}

pub fn social_url(storefront: &Storefront, provider: SocialProvider) -> Result<(), StorefrontError> {
    println!("{}", storefront.social_login_url(provider)?);
    Ok(())
}

pub async fn callback(storefront: &Storefront, url: &str) -> Result<(), StorefrontError> {
    let outcome = storefront.complete_social_login(url).await?;
    if let CallbackOutcome::Failed { .. } = outcome {
        return Err(StorefrontError::SocialLogin(outcome.message()));
    }
    println!("{}", outcome.message());
    Ok(())
}
