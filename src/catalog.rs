use gloo_net::http::Request;
use serde::Deserialize;
use std::collections::HashMap;

use crate::config::AppConfig;

/// Closed set of item categories. `Primary` is the swipeable set; `Secondary`
/// only appears in the gallery.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Primary,
    Secondary,
}

impl Category {
    pub const ALL: [Category; 2] = [Category::Primary, Category::Secondary];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Primary => "primary",
            Category::Secondary => "secondary",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Section {
    pub path: String,
    pub count: u32,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Person {
    pub name: String,
    pub color: String,
    pub sections: HashMap<Category, Section>,
}

/// One selectable media unit, derived once from the static configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogItem {
    pub person: String,
    pub color: String,
    pub category: Category,
    pub seq: u32,
    pub path: String,
}

impl CatalogItem {
    pub fn key(&self) -> String {
        format!("{}/{}/{}", self.person, self.category.as_str(), self.seq)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CatalogFile {
    pub people: Vec<Person>,
    #[serde(default)]
    pub settings: AppConfig,
}

#[derive(Debug)]
pub enum CatalogError {
    Network(String),
    Parse(String),
}

impl CatalogError {
    fn network<E: std::fmt::Display>(err: E) -> Self {
        Self::Network(err.to_string())
    }

    fn parse<E: std::fmt::Display>(err: E) -> Self {
        Self::Parse(err.to_string())
    }
}

impl std::fmt::Display for CatalogError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CatalogError::Network(message) => write!(f, "catalog fetch failed: {message}"),
            CatalogError::Parse(message) => write!(f, "catalog is not valid JSON: {message}"),
        }
    }
}

/// The full enumerable item list per category, built eagerly and never
/// mutated afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct Catalog {
    people: Vec<Person>,
    items: HashMap<Category, Vec<CatalogItem>>,
}

impl Catalog {
    pub fn new(people: Vec<Person>) -> Self {
        let mut items: HashMap<Category, Vec<CatalogItem>> = HashMap::new();
        for category in Category::ALL {
            let mut list = Vec::new();
            for person in &people {
                let Some(section) = person.sections.get(&category) else {
                    continue;
                };
                for seq in 1..=section.count {
                    list.push(CatalogItem {
                        person: person.name.clone(),
                        color: person.color.clone(),
                        category,
                        seq,
                        path: format!("{}/{}.jpg", section.path.trim_end_matches('/'), seq),
                    });
                }
            }
            items.insert(category, list);
        }
        Self { people, items }
    }

    pub fn people(&self) -> &[Person] {
        &self.people
    }

    /// Empty categories yield an empty slice, not an error.
    pub fn items(&self, category: Category) -> &[CatalogItem] {
        self.items
            .get(&category)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn find(&self, key: &str) -> Option<&CatalogItem> {
        Category::ALL
            .iter()
            .flat_map(|category| self.items(*category))
            .find(|item| item.key() == key)
    }
}

pub async fn fetch_catalog(url: &str) -> Result<CatalogFile, CatalogError> {
    let response = Request::get(url)
        .send()
        .await
        .map_err(CatalogError::network)?;

    if !response.ok() {
        return Err(CatalogError::Network(format!(
            "HTTP {} while fetching {}",
            response.status(),
            url
        )));
    }

    let text = response.text().await.map_err(CatalogError::network)?;
    // A catalog with no people parses fine; the deck reports it as the
    // nothing-to-show condition instead of failing the load.
    serde_json::from_str(&text).map_err(CatalogError::parse)
}

#[cfg(test)]
pub(crate) fn test_person(name: &str, primary: u32, secondary: u32) -> Person {
    let mut sections = HashMap::new();
    sections.insert(
        Category::Primary,
        Section {
            path: format!("assets/people/{name}/primary"),
            count: primary,
        },
    );
    if secondary > 0 {
        sections.insert(
            Category::Secondary,
            Section {
                path: format!("assets/people/{name}/secondary"),
                count: secondary,
            },
        );
    }
    Person {
        name: name.to_string(),
        color: "#ff6688".to_string(),
        sections,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn person(name: &str, primary: u32, secondary: u32) -> Person {
        test_person(name, primary, secondary)
    }

    #[test]
    fn derivation_is_eager_and_ordered() {
        let catalog = Catalog::new(vec![person("mina", 2, 1), person("yuna", 1, 0)]);
        let primary = catalog.items(Category::Primary);
        assert_eq!(primary.len(), 3);
        assert_eq!(primary[0].key(), "mina/primary/1");
        assert_eq!(primary[1].key(), "mina/primary/2");
        assert_eq!(primary[2].key(), "yuna/primary/1");
        assert_eq!(catalog.items(Category::Secondary).len(), 1);
    }

    #[test]
    fn paths_are_one_based_and_extension_suffixed() {
        let catalog = Catalog::new(vec![person("mina", 1, 0)]);
        assert_eq!(
            catalog.items(Category::Primary)[0].path,
            "assets/people/mina/primary/1.jpg"
        );
    }

    #[test]
    fn missing_section_yields_empty_not_error() {
        let catalog = Catalog::new(vec![person("yuna", 1, 0)]);
        assert!(catalog.items(Category::Secondary).is_empty());
    }

    #[test]
    fn find_resolves_keys_across_categories() {
        let catalog = Catalog::new(vec![person("mina", 1, 2)]);
        assert!(catalog.find("mina/secondary/2").is_some());
        assert!(catalog.find("mina/secondary/3").is_none());
        assert!(catalog.find("nobody/primary/1").is_none());
    }

    #[test]
    fn catalog_file_parses_with_and_without_settings() {
        let raw = r##"{
            "people": [
                {"name": "mina", "color": "#fa5a8c",
                 "sections": {"primary": {"path": "assets/people/mina/primary", "count": 4}}}
            ],
            "settings": {"fever_threshold": 5}
        }"##;
        let file: CatalogFile = serde_json::from_str(raw).unwrap();
        assert_eq!(file.settings.fever_threshold, 5);
        assert_eq!(file.settings.lookahead_depth, 2);

        let raw = r##"{"people": [{"name": "a", "color": "#fff", "sections": {}}]}"##;
        let file: CatalogFile = serde_json::from_str(raw).unwrap();
        assert_eq!(file.settings.fever_threshold, 10);
    }
}
