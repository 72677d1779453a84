//! Defines the [`NavEntry`] and [`Navigation`] types, which represent the menu
//! of posts rendered into every page.

use gtmpl_value::Value;
use std::collections::HashMap;
use std::iter::FromIterator;

/// A single link in the navigation list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NavEntry {
    /// The relative link to the post's page (e.g., `./hello_world.html`).
    pub url: String,

    /// The post's title, used as the link label.
    pub title: String,
}

/// The ordered list of [`NavEntry`]s. It is built once during discovery and
/// only read afterwards.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Navigation(Vec<NavEntry>);

impl Navigation {
    pub fn iter(&self) -> impl Iterator<Item = &NavEntry> {
        self.0.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<NavEntry> for Navigation {
    fn from_iter<I: IntoIterator<Item = NavEntry>>(iter: I) -> Self {
        Navigation(iter.into_iter().collect())
    }
}

impl From<&NavEntry> for Value {
    /// Converts a [`NavEntry`] into a [`Value::Object`] with the fields `url`
    /// and `title`.
    fn from(entry: &NavEntry) -> Value {
        let mut m: HashMap<String, Value> = HashMap::new();
        m.insert("url".to_owned(), Value::String(entry.url.clone()));
        m.insert("title".to_owned(), Value::String(entry.title.clone()));
        Value::Object(m)
    }
}

impl From<&Navigation> for Value {
    /// Converts a [`Navigation`] into a [`Value::Array`] of entry objects, so
    /// templates can iterate it with `{{range .posts}}`.
    fn from(navigation: &Navigation) -> Value {
        Value::Array(navigation.iter().map(Value::from).collect())
    }
}
