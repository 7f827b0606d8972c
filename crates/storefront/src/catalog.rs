//! Shop browsing: category slugs, listing queries and page titles.
//!
//! Shop pages are addressed by a lowercase slug such as `lashes` or `all`.

use lulu_core::CategoryId;
use tracing::instrument;

use crate::api::types::{Category, ProductQuery, ProductsResponse};
use crate::api::{ApiClient, ApiError};

/// Slug that lists every product.
pub const ALL_SLUG: &str = "all";

/// Products fetched per shop page.
pub const BROWSE_LIMIT: u32 = 100;

/// Newest first.
pub const BROWSE_SORT: &str = "-createdAt";

/// Find the category a shop slug refers to.
///
/// Names match case-insensitively, and `tattoo` also matches a category named
/// `Tattoos`. Empty and `all` slugs match nothing.
#[must_use]
pub fn resolve_category<'a>(slug: &str, categories: &'a [Category]) -> Option<&'a Category> {
    let slug = slug.trim().to_lowercase();
    if slug.is_empty() || slug == ALL_SLUG {
        return None;
    }

    categories.iter().find(|category| {
        let name = category.name.to_lowercase();
        name == slug || (slug == "tattoo" && name == "tattoos")
    })
}

/// Listing query for a shop page.
#[must_use]
pub fn browse_query(category: Option<CategoryId>, search: Option<&str>) -> ProductQuery {
    ProductQuery {
        page: Some(1),
        limit: Some(BROWSE_LIMIT),
        sort: Some(BROWSE_SORT.to_string()),
        category,
        search: search
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_lowercase),
    }
}

/// Heading for a shop page.
#[must_use]
pub fn page_title(slug: &str) -> &'static str {
    match slug.trim().to_lowercase().as_str() {
        "lashes" => "Lashes",
        "brows" => "Brows",
        "tattoo" | "tattoos" => "Tattoos",
        "spa" => "Spa",
        "tools" => "Tools",
        "nails" => "Nails",
        _ => "Shop All Products",
    }
}

/// Fetch the products for a shop page.
///
/// An unknown slug lists every product rather than failing.
///
/// # Errors
///
/// Returns an error if a category or product request fails.
#[instrument(skip(api))]
pub async fn browse(
    api: &ApiClient,
    slug: Option<&str>,
    search: Option<&str>,
) -> Result<ProductsResponse, ApiError> {
    let mut category = None;

    if let Some(slug) = slug.filter(|s| !s.trim().is_empty() && !s.eq_ignore_ascii_case(ALL_SLUG)) {
        let categories = api.categories().await?;
        category = resolve_category(slug, &categories).map(|c| c.id.clone());
        if category.is_none() {
            tracing::debug!(slug, "no category matches slug; listing all products");
        }
    }

    api.products(&browse_query(category, search)).await
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn category(id: &str, name: &str) -> Category {
        Category {
            id: CategoryId::new(id),
            name: name.to_string(),
            description: None,
            created_at: None,
            updated_at: None,
        }
    }

    fn categories() -> Vec<Category> {
        vec![
            category("c1", "Lashes"),
            category("c2", "Brows"),
            category("c3", "Tattoos"),
        ]
    }

    #[test]
    fn test_resolve_is_case_insensitive() {
        let categories = categories();
        assert_eq!(
            resolve_category("lashes", &categories).unwrap().id,
            CategoryId::new("c1")
        );
        assert_eq!(
            resolve_category("BROWS", &categories).unwrap().id,
            CategoryId::new("c2")
        );
    }

    #[test]
    fn test_tattoo_matches_plural() {
        let categories = categories();
        assert_eq!(
            resolve_category("tattoo", &categories).unwrap().id,
            CategoryId::new("c3")
        );
        assert_eq!(
            resolve_category("tattoos", &categories).unwrap().id,
            CategoryId::new("c3")
        );
    }

    #[test]
    fn test_all_and_unknown_resolve_to_none() {
        let categories = categories();
        assert!(resolve_category("all", &categories).is_none());
        assert!(resolve_category("", &categories).is_none());
        assert!(resolve_category("spa", &categories).is_none());
    }

    #[test]
    fn test_browse_query() {
        let query = browse_query(Some(CategoryId::new("c1")), Some("  Lash GLUE "));
        assert_eq!(query.page, Some(1));
        assert_eq!(query.limit, Some(100));
        assert_eq!(query.sort.as_deref(), Some("-createdAt"));
        assert_eq!(query.category, Some(CategoryId::new("c1")));
        assert_eq!(query.search.as_deref(), Some("lash glue"));

        assert_eq!(browse_query(None, Some("")).search, None);
    }

    #[test]
    fn test_page_titles() {
        assert_eq!(page_title("lashes"), "Lashes");
        assert_eq!(page_title("brows"), "Brows");
        assert_eq!(page_title("tattoo"), "Tattoos");
        assert_eq!(page_title("tattoos"), "Tattoos");
        assert_eq!(page_title("spa"), "Spa");
        assert_eq!(page_title("tools"), "Tools");
        assert_eq!(page_title("nails"), "Nails");
        assert_eq!(page_title("all"), "Shop All Products");
        assert_eq!(page_title("unknown"), "Shop All Products");
    }
}
