use crate::core::{CatalogLookup, CatalogSource, Product, ProductId};
use crate::utils::error::{Result, ShopError};
use csv::{ReaderBuilder, StringRecord, Trim};
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::str::FromStr;

/// Number of `|`-separated fields per catalog line:
/// `id|melon_type|common_name|price|image_url|flesh_color|rind_color|seedless`
const FIELD_COUNT: usize = 8;

/// In-memory melon catalog, kept in file order for listing.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    products: Vec<Product>,
    index: HashMap<ProductId, usize>,
}

impl Catalog {
    pub fn new(products: Vec<Product>) -> Result<Self> {
        let mut index = HashMap::with_capacity(products.len());
        for (position, product) in products.iter().enumerate() {
            if product.price.is_sign_negative() {
                return Err(ShopError::CatalogError {
                    message: format!("melon {} has a negative price", product.id),
                });
            }
            if index.insert(product.id, position).is_some() {
                return Err(ShopError::CatalogError {
                    message: format!("duplicate melon id {}", product.id),
                });
            }
        }

        Ok(Self { products, index })
    }

    pub async fn load(source: &dyn CatalogSource) -> Result<Self> {
        tracing::info!("Loading catalog from {}", source.describe());
        let text = source.fetch().await?;
        let catalog = Self::parse(&text)?;
        tracing::info!("Loaded {} melons", catalog.len());
        Ok(catalog)
    }

    /// 解析 `|` 分隔的目錄文字，空白行略過
    pub fn parse(text: &str) -> Result<Self> {
        let mut reader = ReaderBuilder::new()
            .delimiter(b'|')
            .has_headers(false)
            .flexible(true)
            .quoting(false)
            .trim(Trim::All)
            .from_reader(text.as_bytes());

        let mut products = Vec::new();
        for record in reader.records() {
            let record = record?;
            let line = record.position().map(|p| p.line()).unwrap_or(0);
            products.push(parse_record(&record, line)?);
        }

        Self::new(products)
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

impl CatalogLookup for Catalog {
    fn all(&self) -> &[Product] {
        &self.products
    }

    fn get_by_id(&self, id: ProductId) -> Result<&Product> {
        self.index
            .get(&id)
            .map(|&position| &self.products[position])
            .ok_or(ShopError::ProductNotFound { id })
    }
}

fn parse_record(record: &StringRecord, line: u64) -> Result<Product> {
    if record.len() != FIELD_COUNT {
        return Err(line_error(
            line,
            format!("expected {} fields, found {}", FIELD_COUNT, record.len()),
        ));
    }

    let field = |i: usize| record.get(i).unwrap_or_default();

    let id = field(0)
        .parse::<ProductId>()
        .map_err(|e| line_error(line, format!("invalid id '{}': {}", field(0), e)))?;
    let price = Decimal::from_str(field(3))
        .map_err(|e| line_error(line, format!("invalid price '{}': {}", field(3), e)))?;
    if price.is_sign_negative() {
        return Err(line_error(line, format!("negative price '{}'", field(3))));
    }
    let seedless = parse_flag(field(7))
        .ok_or_else(|| line_error(line, format!("invalid seedless flag '{}'", field(7))))?;

    Ok(Product {
        id,
        melon_type: field(1).to_string(),
        common_name: field(2).to_string(),
        price,
        image_url: field(4).to_string(),
        flesh_color: field(5).to_string(),
        rind_color: field(6).to_string(),
        seedless,
    })
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" => Some(true),
        "0" | "false" | "no" => Some(false),
        _ => None,
    }
}

fn line_error(line: u64, message: String) -> ShopError {
    ShopError::CatalogError {
        message: format!("line {}: {}", line, message),
    }
}
