use crate::middleware::validate::validation_messages;
use serde::{Deserialize, Serialize};
use shared::errors::ServiceError;
use std::{collections::HashMap, str::FromStr};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

pub const DEFAULT_PAGE: i64 = 1;
pub const DEFAULT_LIMIT: i64 = 10;
pub const MAX_LIMIT: i64 = 100;
/// Highest page whose offset still fits an `i64` at `MAX_LIMIT`.
pub const MAX_PAGE: i64 = i64::MAX / MAX_LIMIT;

/// Text parts of a multipart product form, keyed by field name.
pub type FormFields = HashMap<String, String>;

/// Raw query string of the client listing. Every value stays a string so
/// that malformed numbers fall back to defaults instead of rejecting.
#[derive(Debug, Clone, Default, Serialize, Deserialize, IntoParams, ToSchema)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct FindAllProducts {
    pub page: Option<String>,
    pub limit: Option<String>,
    /// Comma-separated categories
    pub categories: Option<String>,
    /// Comma-separated brands
    pub brands: Option<String>,
    /// Comma-separated sizes
    pub sizes: Option<String>,
    /// Comma-separated colors
    pub colors: Option<String>,
    pub min_price: Option<String>,
    pub max_price: Option<String>,
    /// One of createdAt, updatedAt, name, price, rating, soldCount, stock
    pub sort_by: Option<String>,
    /// asc or desc
    pub sort_order: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    CreatedAt,
    UpdatedAt,
    Name,
    Price,
    Rating,
    SoldCount,
    Stock,
}

impl SortField {
    pub fn column(self) -> &'static str {
        match self {
            SortField::CreatedAt => "created_at",
            SortField::UpdatedAt => "updated_at",
            SortField::Name => "name",
            SortField::Price => "price",
            SortField::Rating => "rating",
            SortField::SoldCount => "sold_count",
            SortField::Stock => "stock",
        }
    }
}

impl FromStr for SortField {
    type Err = ServiceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "createdAt" => Ok(SortField::CreatedAt),
            "updatedAt" => Ok(SortField::UpdatedAt),
            "name" => Ok(SortField::Name),
            "price" => Ok(SortField::Price),
            "rating" => Ok(SortField::Rating),
            "soldCount" => Ok(SortField::SoldCount),
            "stock" => Ok(SortField::Stock),
            other => Err(ServiceError::validation(format!(
                "sortBy: unsupported sort field '{other}'"
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    pub fn sql(self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }
}

impl FromStr for SortOrder {
    type Err = ServiceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "asc" => Ok(SortOrder::Asc),
            "desc" => Ok(SortOrder::Desc),
            _ => Err(ServiceError::validation(format!(
                "sortOrder: must be 'asc' or 'desc', got '{s}'"
            ))),
        }
    }
}

/// Parsed listing query: a conjunction of the non-empty filters plus
/// paging and ordering.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductFilter {
    pub page: i64,
    pub limit: i64,
    pub categories: Vec<String>,
    pub brands: Vec<String>,
    pub sizes: Vec<String>,
    pub colors: Vec<String>,
    pub min_price: f64,
    pub max_price: Option<f64>,
    pub sort_by: SortField,
    pub sort_order: SortOrder,
}

impl Default for ProductFilter {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
            categories: Vec::new(),
            brands: Vec::new(),
            sizes: Vec::new(),
            colors: Vec::new(),
            min_price: 0.0,
            max_price: None,
            sort_by: SortField::CreatedAt,
            sort_order: SortOrder::Desc,
        }
    }
}

impl ProductFilter {
    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.limit)
    }
}

impl TryFrom<&FindAllProducts> for ProductFilter {
    type Error = ServiceError;

    fn try_from(query: &FindAllProducts) -> Result<Self, Self::Error> {
        let page = positive_or(query.page.as_deref(), DEFAULT_PAGE).min(MAX_PAGE);
        let limit = positive_or(query.limit.as_deref(), DEFAULT_LIMIT).min(MAX_LIMIT);

        let min_price = query
            .min_price
            .as_deref()
            .and_then(|v| v.trim().parse::<f64>().ok())
            .filter(|v| v.is_finite() && *v > 0.0)
            .unwrap_or(0.0);
        let max_price = query
            .max_price
            .as_deref()
            .and_then(|v| v.trim().parse::<f64>().ok())
            .filter(|v| v.is_finite() && *v > 0.0);

        let sort_by = match non_blank(query.sort_by.as_deref()) {
            Some(v) => v.parse()?,
            None => SortField::CreatedAt,
        };
        let sort_order = match non_blank(query.sort_order.as_deref()) {
            Some(v) => v.parse()?,
            None => SortOrder::Desc,
        };

        Ok(Self {
            page,
            limit,
            categories: split_csv(query.categories.as_deref()),
            brands: split_csv(query.brands.as_deref()),
            sizes: split_csv(query.sizes.as_deref()),
            colors: split_csv(query.colors.as_deref()),
            min_price,
            max_price,
            sort_by,
            sort_order,
        })
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn positive_or(value: Option<&str>, default: i64) -> i64 {
    value
        .and_then(|v| v.trim().parse::<i64>().ok())
        .filter(|v| *v > 0)
        .unwrap_or(default)
}

/// Splits a comma-separated value, trimming items and dropping empty ones.
pub fn split_csv(value: Option<&str>) -> Vec<String> {
    value
        .unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// An image file received in a product form.
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateProductRequest {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,

    #[validate(length(min = 1, message = "Brand is required"))]
    pub brand: String,

    #[validate(length(min = 1, message = "Description is required"))]
    pub description: String,

    #[validate(length(min = 1, message = "Category is required"))]
    pub category: String,

    #[validate(length(min = 1, message = "Gender is required"))]
    pub gender: String,

    pub sizes: Vec<String>,

    pub colors: Vec<String>,

    #[validate(range(min = 0.0, message = "Price must not be negative"))]
    pub price: f64,

    #[validate(range(min = 0, message = "Stock cannot be negative"))]
    pub stock: i32,
}

impl CreateProductRequest {
    pub fn from_form(fields: &FormFields) -> Result<Self, ServiceError> {
        let req = Self {
            name: text(fields, "name"),
            brand: text(fields, "brand"),
            description: text(fields, "description"),
            category: text(fields, "category"),
            gender: text(fields, "gender"),
            sizes: split_csv(fields.get("sizes").map(String::as_str)),
            colors: split_csv(fields.get("colors").map(String::as_str)),
            price: number(fields, "price")?,
            stock: number(fields, "stock")?,
        };

        req.validate()
            .map_err(|e| ServiceError::Validation(validation_messages(&e)))?;
        ensure_finite("price", req.price)?;

        Ok(req)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateProductRequest {
    pub id: uuid::Uuid,

    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,

    #[validate(length(min = 1, message = "Brand is required"))]
    pub brand: String,

    #[validate(length(min = 1, message = "Description is required"))]
    pub description: String,

    #[validate(length(min = 1, message = "Category is required"))]
    pub category: String,

    #[validate(length(min = 1, message = "Gender is required"))]
    pub gender: String,

    pub sizes: Vec<String>,

    pub colors: Vec<String>,

    #[validate(range(min = 0.0, message = "Price must not be negative"))]
    pub price: f64,

    #[validate(range(min = 0, message = "Stock cannot be negative"))]
    pub stock: i32,

    /// Left unchanged when the form omits it
    #[validate(range(min = 0.0, max = 5.0, message = "Rating must be between 0 and 5"))]
    pub rating: Option<f64>,
}

impl UpdateProductRequest {
    pub fn from_form(id: uuid::Uuid, fields: &FormFields) -> Result<Self, ServiceError> {
        let req = Self {
            id,
            name: text(fields, "name"),
            brand: text(fields, "brand"),
            description: text(fields, "description"),
            category: text(fields, "category"),
            gender: text(fields, "gender"),
            sizes: split_csv(fields.get("sizes").map(String::as_str)),
            colors: split_csv(fields.get("colors").map(String::as_str)),
            price: number(fields, "price")?,
            stock: number(fields, "stock")?,
            rating: match fields.get("rating").map(|v| v.trim()) {
                Some(v) if !v.is_empty() => Some(number(fields, "rating")?),
                _ => None,
            },
        };

        req.validate()
            .map_err(|e| ServiceError::Validation(validation_messages(&e)))?;
        ensure_finite("price", req.price)?;
        if let Some(rating) = req.rating {
            ensure_finite("rating", rating)?;
        }

        Ok(req)
    }
}

fn ensure_finite(key: &str, value: f64) -> Result<(), ServiceError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ServiceError::validation(format!("{key}: must be a finite number")))
    }
}

fn text(fields: &FormFields, key: &str) -> String {
    fields
        .get(key)
        .map(|v| v.trim().to_string())
        .unwrap_or_default()
}

fn number<T: FromStr>(fields: &FormFields, key: &str) -> Result<T, ServiceError> {
    let raw = fields
        .get(key)
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
        .ok_or_else(|| ServiceError::validation(format!("{key}: is required")))?;

    raw.parse::<T>()
        .map_err(|_| ServiceError::validation(format!("{key}: '{raw}' is not a valid number")))
}

/// OpenAPI shape of the multipart product form.
#[derive(ToSchema)]
pub struct ProductFormSchema {
    #[schema(example = "Runner 2")]
    pub name: String,
    #[schema(example = "Acme")]
    pub brand: String,
    pub description: String,
    #[schema(example = "Shoes")]
    pub category: String,
    #[schema(example = "Unisex")]
    pub gender: String,
    #[schema(example = "S,M,L")]
    pub sizes: String,
    #[schema(example = "red,black")]
    pub colors: String,
    #[schema(example = "79.99")]
    pub price: String,
    #[schema(example = "25")]
    pub stock: String,
    /// Only read on update
    pub rating: Option<String>,
    #[schema(value_type = Vec<String>, format = Binary)]
    pub images: Vec<Vec<u8>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(pairs: &[(&str, &str)]) -> FindAllProducts {
        let map: serde_json::Map<String, serde_json::Value> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), serde_json::Value::from(*v)))
            .collect();
        serde_json::from_value(serde_json::Value::Object(map)).unwrap()
    }

    #[test]
    fn split_csv_drops_empty_segments() {
        assert_eq!(split_csv(Some("a,,b, ,c,")), vec!["a", "b", "c"]);
        assert!(split_csv(Some("")).is_empty());
        assert!(split_csv(None).is_empty());
    }

    #[test]
    fn empty_query_uses_defaults() {
        let filter = ProductFilter::try_from(&FindAllProducts::default()).unwrap();
        assert_eq!(filter, ProductFilter::default());
        assert_eq!(filter.offset(), 0);
    }

    #[test]
    fn paging_falls_back_on_garbage() {
        let filter = ProductFilter::try_from(&query(&[("page", "abc"), ("limit", "0")])).unwrap();
        assert_eq!((filter.page, filter.limit), (DEFAULT_PAGE, DEFAULT_LIMIT));

        let filter = ProductFilter::try_from(&query(&[("page", "3"), ("limit", "20")])).unwrap();
        assert_eq!(filter.offset(), 40);

        let filter = ProductFilter::try_from(&query(&[("limit", "5000")])).unwrap();
        assert_eq!(filter.limit, MAX_LIMIT);
    }

    #[test]
    fn huge_page_is_clamped_without_overflow() {
        let filter = ProductFilter::try_from(&query(&[
            ("page", "9223372036854775807"),
            ("limit", "10"),
        ]))
        .unwrap();
        assert_eq!(filter.page, MAX_PAGE);
        assert_eq!(filter.offset(), (MAX_PAGE - 1) * 10);

        let filter = ProductFilter::try_from(&query(&[
            ("page", "9223372036854775807"),
            ("limit", "100"),
        ]))
        .unwrap();
        assert!(filter.offset() > 0);
    }

    #[test]
    fn filters_and_price_range_are_parsed() {
        let filter = ProductFilter::try_from(&query(&[
            ("categories", "Shoes,Shirts"),
            ("brands", "Acme"),
            ("sizes", "M,L"),
            ("colors", "red"),
            ("minPrice", "10.5"),
            ("maxPrice", "99"),
        ]))
        .unwrap();

        assert_eq!(filter.categories, vec!["Shoes", "Shirts"]);
        assert_eq!(filter.brands, vec!["Acme"]);
        assert_eq!(filter.sizes, vec!["M", "L"]);
        assert_eq!(filter.colors, vec!["red"]);
        assert_eq!(filter.min_price, 10.5);
        assert_eq!(filter.max_price, Some(99.0));
    }

    #[test]
    fn sort_comes_from_the_query_string() {
        let filter =
            ProductFilter::try_from(&query(&[("sortBy", "price"), ("sortOrder", "asc")])).unwrap();
        assert_eq!(filter.sort_by, SortField::Price);
        assert_eq!(filter.sort_order, SortOrder::Asc);
        assert_eq!(filter.sort_by.column(), "price");
    }

    #[test]
    fn unknown_sort_input_is_rejected() {
        let err = ProductFilter::try_from(&query(&[("sortBy", "price;DROP TABLE products")]))
            .unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));

        let err = ProductFilter::try_from(&query(&[("sortOrder", "sideways")])).unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
    }

    fn form(pairs: &[(&str, &str)]) -> FormFields {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn valid_form() -> FormFields {
        form(&[
            ("name", "Runner 2"),
            ("brand", "Acme"),
            ("description", "Light running shoe"),
            ("category", "Shoes"),
            ("gender", "Unisex"),
            ("sizes", "40,41,42"),
            ("colors", "red,black"),
            ("price", "79.99"),
            ("stock", "25"),
        ])
    }

    #[test]
    fn create_form_is_parsed() {
        let req = CreateProductRequest::from_form(&valid_form()).unwrap();
        assert_eq!(req.sizes, vec!["40", "41", "42"]);
        assert_eq!(req.colors, vec!["red", "black"]);
        assert_eq!(req.price, 79.99);
        assert_eq!(req.stock, 25);
    }

    #[test]
    fn create_form_rejects_bad_numbers_and_blanks() {
        let mut fields = valid_form();
        fields.insert("price".into(), "cheap".into());
        assert!(CreateProductRequest::from_form(&fields).is_err());

        let mut fields = valid_form();
        fields.insert("stock".into(), "-1".into());
        assert!(CreateProductRequest::from_form(&fields).is_err());

        let mut fields = valid_form();
        fields.insert("name".into(), "   ".into());
        let err = CreateProductRequest::from_form(&fields).unwrap_err();
        assert!(matches!(err, ServiceError::Validation(ref m) if m[0].starts_with("name")));
    }

    #[test]
    fn update_form_checks_rating_bounds() {
        let id = uuid::Uuid::new_v4();
        let mut fields = valid_form();
        fields.insert("rating".into(), "4.5".into());
        assert_eq!(
            UpdateProductRequest::from_form(id, &fields).unwrap().rating,
            Some(4.5)
        );

        fields.insert("rating".into(), "7".into());
        assert!(UpdateProductRequest::from_form(id, &fields).is_err());

        fields.insert("rating".into(), " ".into());
        assert_eq!(UpdateProductRequest::from_form(id, &fields).unwrap().rating, None);
    }
}
