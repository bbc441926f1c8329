use crate::types::{Category, Dish, DishId, Price};
use async_trait::async_trait;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[cfg(feature = "catalog-mealdb")]
use reqwest::Client;
#[cfg(feature = "catalog-mealdb")]
use std::time::Duration;
#[cfg(feature = "catalog-mealdb")]
use url::Url;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("catalog io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("catalog parse error: {0}")]
    Parse(String),
    #[error("catalog request failed: {0}")]
    Request(String),
    #[error("catalog response invalid: {0}")]
    InvalidResponse(String),
    #[error("catalog invalid: {0}")]
    Invalid(String),
}

/// Source of menu categories.
#[async_trait]
pub trait CatalogProvider: Send + Sync {
    async fn load(&self) -> Result<Vec<Category>, CatalogError>;
}

#[async_trait]
impl<T> CatalogProvider for Box<T>
where
    T: CatalogProvider + ?Sized,
{
    async fn load(&self) -> Result<Vec<Category>, CatalogError> {
        (**self).load().await
    }
}

/// Validated, ordered menu.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Catalog {
    categories: Vec<Category>,
}

impl Catalog {
    /// Checks names are present and ids are unique across the whole menu.
    pub fn new(categories: Vec<Category>) -> Result<Self, CatalogError> {
        let mut category_ids = BTreeSet::new();
        let mut dish_ids = BTreeSet::new();
        for category in &categories {
            if category.name.trim().is_empty() {
                return Err(CatalogError::Invalid(format!(
                    "category {} has an empty name",
                    category.id
                )));
            }
            if !category_ids.insert(category.id) {
                return Err(CatalogError::Invalid(format!(
                    "duplicate category id {}",
                    category.id
                )));
            }
            for dish in &category.items {
                if dish.name.trim().is_empty() {
                    return Err(CatalogError::Invalid(format!(
                        "dish {} has an empty name",
                        dish.id
                    )));
                }
                if !dish_ids.insert(dish.id) {
                    return Err(CatalogError::Invalid(format!(
                        "duplicate dish id {}",
                        dish.id
                    )));
                }
            }
        }
        Ok(Self { categories })
    }

    pub async fn from_provider<P>(provider: &P) -> Result<Self, CatalogError>
    where
        P: CatalogProvider + ?Sized,
    {
        let catalog = Self::new(provider.load().await?)?;
        info!(
            "catalog loaded: {} categories, {} dishes",
            catalog.categories.len(),
            catalog.dishes().count()
        );
        Ok(catalog)
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn dishes(&self) -> impl Iterator<Item = &Dish> {
        self.categories.iter().flat_map(|c| c.items.iter())
    }

    pub fn dish(&self, id: DishId) -> Option<&Dish> {
        self.dishes().find(|dish| dish.id == id)
    }

    pub fn is_empty(&self) -> bool {
        self.dishes().next().is_none()
    }
}

/// The house menu.
#[derive(Debug, Clone, Default)]
pub struct StaticCatalog;

impl StaticCatalog {
    pub fn categories() -> Vec<Category> {
        vec![
            Category {
                id: 1,
                name: "Coffee Creations".to_string(),
                items: vec![
                    house_dish(
                        1,
                        "Brainstorm Brew",
                        "Espresso or strong brewed coffee with Lion's mane + Cordyceps, oat milk, vanilla syrup, and cinnamon. Topped with light foam and cinnamon dust.",
                        450,
                        "/images/coffee-latte.jpg",
                    ),
                    house_dish(
                        2,
                        "Immunity Mocha",
                        "Espresso or strong brewed coffee with Chaga + Reishi, raw cacao powder, coconut milk, and maple syrup. Topped with whipped coconut cream and cacao nibs.",
                        475,
                        "/images/cappucinno.jpg",
                    ),
                    house_dish(
                        3,
                        "Earthy Espresso",
                        "Espresso or strong brewed coffee with Chaga + Cordyceps, hazelnut milk, cardamom, and vanilla. Topped with crushed hazelnuts and caramel drizzle.",
                        480,
                        "/images/iced-latte.jpg",
                    ),
                ],
            },
            Category {
                id: 2,
                name: "Matcha Magic".to_string(),
                items: vec![
                    house_dish(
                        4,
                        "Zen Matcha Latte",
                        "Ceremonial-grade matcha with Reishi + Lion's mane, almond milk, honey, and nutmeg. Topped with matcha sprinkle and edible gold flakes.",
                        500,
                        "/images/matcha-latte.jpg",
                    ),
                    house_dish(
                        5,
                        "Matcha Powerhouse",
                        "Ceremonial-grade matcha with Cordyceps + Lion's mane, cashew milk, maca powder, and agave. Topped with bee pollen and turmeric.",
                        525,
                        "/images/iced-matcha.jpg",
                    ),
                    house_dish(
                        6,
                        "Golden Matcha Glow",
                        "Ceremonial-grade matcha with Reishi + Chaga, golden milk blend (turmeric, ginger, cinnamon), and oat milk. Topped with black pepper and edible flowers.",
                        550,
                        "/images/matcha.jpg",
                    ),
                ],
            },
        ]
    }
}

fn house_dish(id: u32, name: &str, description: &str, pence: u64, image: &str) -> Dish {
    Dish {
        id: DishId(id),
        name: name.to_string(),
        description: description.to_string(),
        price: Price::from_minor_units(pence),
        image: image.to_string(),
    }
}

#[async_trait]
impl CatalogProvider for StaticCatalog {
    async fn load(&self) -> Result<Vec<Category>, CatalogError> {
        Ok(Self::categories())
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct CatalogFile {
    categories: Vec<Category>,
}

/// Menu read from a TOML or JSON file holding a `categories` list.
#[derive(Debug, Clone)]
pub struct FileCatalog {
    path: PathBuf,
}

impl FileCatalog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn parse(&self, content: &str) -> Result<CatalogFile, CatalogError> {
        let is_json = self
            .path
            .extension()
            .and_then(|s| s.to_str())
            .unwrap_or_default()
            .eq_ignore_ascii_case("json");
        if is_json {
            serde_json::from_str(content).map_err(|e| CatalogError::Parse(e.to_string()))
        } else {
            toml::from_str(content).map_err(|e| CatalogError::Parse(e.to_string()))
        }
    }
}

#[async_trait]
impl CatalogProvider for FileCatalog {
    async fn load(&self) -> Result<Vec<Category>, CatalogError> {
        debug!("reading catalog from {}", self.path.display());
        let content = fs::read_to_string(&self.path)?;
        Ok(self.parse(&content)?.categories)
    }
}

/// Menu fetched from TheMealDB search endpoint.
///
/// The API carries no prices, so every meal is offered at `default_price`.
#[cfg(feature = "catalog-mealdb")]
#[derive(Debug, Clone)]
pub struct MealDbCatalog {
    pub endpoint: String,
    pub default_price: Price,
    client: Client,
}

#[cfg(feature = "catalog-mealdb")]
impl MealDbCatalog {
    pub const DEFAULT_ENDPOINT: &'static str =
        "https://www.themealdb.com/api/json/v1/1/search.php";

    pub fn new(
        endpoint: String,
        default_price: Price,
        timeout: Duration,
    ) -> Result<Self, CatalogError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| CatalogError::Request(e.to_string()))?;
        Ok(Self {
            endpoint,
            default_price,
            client,
        })
    }

    fn search_url(&self) -> Result<Url, CatalogError> {
        Url::parse_with_params(&self.endpoint, &[("s", "")])
            .map_err(|e| CatalogError::Request(format!("bad endpoint {}: {e}", self.endpoint)))
    }
}

#[cfg(feature = "catalog-mealdb")]
#[derive(Debug, Deserialize)]
struct MealDbResponse {
    meals: Option<Vec<MealDbMeal>>,
}

#[cfg(feature = "catalog-mealdb")]
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MealDbMeal {
    id_meal: String,
    str_meal: String,
    str_category: Option<String>,
    str_instructions: Option<String>,
    str_meal_thumb: Option<String>,
}

#[cfg(feature = "catalog-mealdb")]
fn group_meals(meals: Vec<MealDbMeal>, price: Price) -> Result<Vec<Category>, CatalogError> {
    let mut categories: Vec<Category> = Vec::new();
    for meal in meals {
        let id = meal.id_meal.trim().parse::<u32>().map_err(|_| {
            CatalogError::InvalidResponse(format!("non-numeric idMeal `{}`", meal.id_meal))
        })?;
        let dish = Dish {
            id: DishId(id),
            name: meal.str_meal,
            description: meal.str_instructions.unwrap_or_default(),
            price,
            image: meal.str_meal_thumb.unwrap_or_default(),
        };
        let name = meal
            .str_category
            .filter(|c| !c.trim().is_empty())
            .unwrap_or_else(|| "Other".to_string());
        match categories.iter_mut().find(|c| c.name == name) {
            Some(category) => category.items.push(dish),
            None => {
                let id = categories.len() as u32 + 1;
                categories.push(Category {
                    id,
                    name,
                    items: vec![dish],
                });
            }
        }
    }
    Ok(categories)
}

#[cfg(feature = "catalog-mealdb")]
#[async_trait]
impl CatalogProvider for MealDbCatalog {
    async fn load(&self) -> Result<Vec<Category>, CatalogError> {
        let url = self.search_url()?;
        debug!("fetching catalog from {url}");
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| CatalogError::Request(e.to_string()))?;
        let status = response.status();
        if !status.is_success() {
            return Err(CatalogError::Request(format!(
                "http status {status} from catalog"
            )));
        }
        let body: MealDbResponse = response
            .json()
            .await
            .map_err(|e| CatalogError::InvalidResponse(e.to_string()))?;
        group_meals(body.meals.unwrap_or_default(), self.default_price)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{SystemTime, UNIX_EPOCH};

    #[tokio::test]
    async fn static_catalog_is_valid() {
        let catalog = Catalog::from_provider(&StaticCatalog)
            .await
            .expect("static catalog must validate");
        assert_eq!(catalog.categories().len(), 2);
        assert_eq!(catalog.dishes().count(), 6);
        let ids: Vec<u32> = catalog.dishes().map(|d| d.id.0).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn lookup_finds_dish_by_id() {
        let catalog = Catalog::new(StaticCatalog::categories()).expect("catalog");
        let dish = catalog.dish(DishId(4)).expect("dish 4");
        assert_eq!(dish.name, "Zen Matcha Latte");
        assert_eq!(dish.price.to_string(), "5.00");
        assert!(catalog.dish(DishId(99)).is_none());
    }

    #[test]
    fn duplicate_dish_ids_are_rejected() {
        let mut categories = StaticCatalog::categories();
        let copy = categories[0].items[0].clone();
        categories[1].items.push(copy);
        let err = Catalog::new(categories).expect_err("duplicate must fail");
        assert!(err.to_string().contains("duplicate dish id 1"));
    }

    #[test]
    fn blank_dish_name_is_rejected() {
        let mut categories = StaticCatalog::categories();
        categories[0].items[1].name = "  ".to_string();
        assert!(matches!(
            Catalog::new(categories),
            Err(CatalogError::Invalid(_))
        ));
    }

    fn temp_file(name: &str, content: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "mycobrew-catalog-test-{}-{}",
            std::process::id(),
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .expect("time")
                .as_nanos()
        ));
        fs::create_dir_all(&dir).expect("create temp dir");
        let path = dir.join(name);
        fs::write(&path, content).expect("write catalog");
        path
    }

    #[tokio::test]
    async fn file_catalog_reads_toml() {
        let path = temp_file(
            "menu.toml",
            r#"
            [[categories]]
            id = 1
            name = "Seasonal"

            [[categories.items]]
            id = 10
            name = "Pumpkin Reishi Latte"
            description = "autumn special"
            price = 5.95
            image = "/images/pumpkin.jpg"
            "#,
        );
        let categories = FileCatalog::new(&path).load().await.expect("load toml");
        assert_eq!(categories[0].items[0].price.minor_units(), 595);
        fs::remove_dir_all(path.parent().expect("parent")).expect("cleanup");
    }

    #[tokio::test]
    async fn file_catalog_reads_json_and_rejects_negative_price() {
        let path = temp_file(
            "menu.json",
            r#"{"categories":[{"id":1,"name":"x","items":[{"id":1,"name":"a","description":"","price":-2,"image":""}]}]}"#,
        );
        let err = FileCatalog::new(&path)
            .load()
            .await
            .expect_err("negative price must fail");
        assert!(matches!(err, CatalogError::Parse(_)));
        fs::remove_dir_all(path.parent().expect("parent")).expect("cleanup");
    }

    #[tokio::test]
    async fn missing_file_is_io_error() {
        let err = FileCatalog::new("/definitely/not/here.toml")
            .load()
            .await
            .expect_err("missing file");
        assert!(matches!(err, CatalogError::Io(_)));
    }

    #[cfg(feature = "catalog-mealdb")]
    #[test]
    fn meals_group_by_category_at_default_price() {
        let body: MealDbResponse = serde_json::from_str(
            r#"{"meals":[
                {"idMeal":"52772","strMeal":"Teriyaki Chicken","strCategory":"Chicken","strInstructions":"cook","strMealThumb":"https://x/1.jpg"},
                {"idMeal":"52874","strMeal":"Beef Pie","strCategory":"Beef","strInstructions":null,"strMealThumb":null},
                {"idMeal":"52940","strMeal":"Chicken Curry","strCategory":"Chicken","strInstructions":"simmer","strMealThumb":"https://x/3.jpg"}
            ]}"#,
        )
        .expect("parse");
        let categories = group_meals(
            body.meals.expect("meals"),
            Price::from_minor_units(450),
        )
        .expect("group");
        assert_eq!(categories.len(), 2);
        assert_eq!(categories[0].name, "Chicken");
        assert_eq!(categories[0].items.len(), 2);
        assert_eq!(categories[1].items[0].description, "");
        assert!(categories
            .iter()
            .flat_map(|c| c.items.iter())
            .all(|d| d.price.minor_units() == 450));
    }

    #[cfg(feature = "catalog-mealdb")]
    #[test]
    fn null_meals_means_empty_menu() {
        let body: MealDbResponse = serde_json::from_str(r#"{"meals":null}"#).expect("parse");
        assert!(body.meals.is_none());
    }

    /// Serves a single JSON response on a local port and returns the address.
    #[cfg(feature = "catalog-mealdb")]
    async fn serve_json_once(body: &'static str) -> std::net::SocketAddr {
        use tokio::io::{AsyncReadExt, AsyncWriteExt};

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind");
        let addr = listener.local_addr().expect("local addr");
        tokio::spawn(async move {
            let (mut stream, _) = listener.accept().await.expect("accept");
            let mut request = Vec::new();
            let mut chunk = [0u8; 1024];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = stream.read(&mut chunk).await.expect("read");
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&chunk[..n]);
            }
            let response = format!(
                "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            stream.write_all(response.as_bytes()).await.expect("write");
            stream.shutdown().await.ok();
        });
        addr
    }

    #[cfg(feature = "catalog-mealdb")]
    #[tokio::test]
    async fn mealdb_null_meals_loads_empty_menu() {
        let addr = serve_json_once(r#"{"meals":null}"#).await;
        let catalog = MealDbCatalog::new(
            format!("http://{addr}/search.php"),
            Price::from_minor_units(450),
            Duration::from_secs(5),
        )
        .expect("client");
        let categories = catalog.load().await.expect("null meals is not an error");
        assert!(categories.is_empty());
    }

    #[cfg(feature = "catalog-mealdb")]
    #[test]
    fn search_url_appends_query() {
        let catalog = MealDbCatalog::new(
            MealDbCatalog::DEFAULT_ENDPOINT.to_string(),
            Price::ZERO,
            Duration::from_secs(1),
        )
        .expect("client");
        let url = catalog.search_url().expect("url");
        assert_eq!(url.query(), Some("s="));
    }
}
