// src/registry.rs

//! Named figure producers, kept in registration order.

use std::error::Error;
use std::fmt;
use std::sync::Arc;

use crate::figure::Figure;

pub type ProducerResult = Result<Figure, Box<dyn Error + Send + Sync>>;

/// Zero-argument figure builder. Shared so a registry can be cloned into a
/// selection and called from worker threads.
pub type Producer = Arc<dyn Fn() -> ProducerResult + Send + Sync>;

#[derive(Clone)]
pub struct FigureEntry {
    pub name: String,
    /// `module_path!()` of the registration site.
    pub module: &'static str,
    pub producer: Producer,
}

impl FigureEntry {
    pub fn call(&self) -> ProducerResult {
        (self.producer)()
    }
}

impl fmt::Debug for FigureEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FigureEntry")
            .field("name", &self.name)
            .field("module", &self.module)
            .finish_non_exhaustive()
    }
}

/// Insertion-ordered name -> producer mapping.
#[derive(Clone, Default, Debug)]
pub struct FigureRegistry {
    entries: Vec<FigureEntry>,
}

impl FigureRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `producer` under `name`. Registering a name twice replaces
    /// the producer and keeps the original position.
    pub fn add<F>(&mut self, name: impl Into<String>, module: &'static str, producer: F) -> &mut Self
    where
        F: Fn() -> ProducerResult + Send + Sync + 'static,
    {
        self.insert(FigureEntry {
            name: name.into(),
            module,
            producer: Arc::new(producer),
        });
        self
    }

    pub fn insert(&mut self, entry: FigureEntry) {
        match self.entries.iter_mut().find(|e| e.name == entry.name) {
            Some(existing) => {
                log::debug!("Replacing producer for figure '{}'", entry.name);
                *existing = entry;
            }
            None => self.entries.push(entry),
        }
    }

    pub fn get(&self, name: &str) -> Option<&FigureEntry> {
        self.entries.iter().find(|e| e.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.name.as_str())
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FigureEntry> {
        self.entries.iter()
    }

    /// Keeps the entries for which every predicate holds.
    pub fn filter(&self, predicates: &[&dyn Fn(&FigureEntry) -> bool]) -> FigureRegistry {
        let entries = self
            .entries
            .iter()
            .filter(|e| predicates.iter().all(|p| p(e)))
            .cloned()
            .collect();
        FigureRegistry { entries }
    }

    /// Keeps only the figures registered from `entry_module`, so a program
    /// offers the figures it defines itself and none pulled in from library
    /// code. Usually called through [`filter_default!`](crate::filter_default).
    pub fn filter_default(&self, entry_module: &str) -> FigureRegistry {
        let in_entry = defined_in(entry_module);
        self.filter(&[&in_entry])
    }
}

impl<'a> IntoIterator for &'a FigureRegistry {
    type Item = &'a FigureEntry;
    type IntoIter = std::slice::Iter<'a, FigureEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Predicate for entries registered in exactly `module`.
pub fn defined_in(module: &str) -> impl Fn(&FigureEntry) -> bool + '_ {
    move |entry: &FigureEntry| entry.module == module
}

/// Wraps `producer` so each call logs when it starts and finishes.
pub fn verbose<F>(name: &str, summary: &str, producer: F) -> impl Fn() -> ProducerResult + Send + Sync
where
    F: Fn() -> ProducerResult + Send + Sync,
{
    let name = name.to_string();
    let summary = summary.to_string();
    move || {
        log::info!("Starting {} - {}", name, summary);
        let fig = producer()?;
        log::info!("Finished {}", name);
        Ok(fig)
    }
}

/// Filters a registry down to the figures registered from the calling
/// module, normally a binary's `main.rs`.
#[macro_export]
macro_rules! filter_default {
    ($registry:expr) => {
        $registry.filter_default(module_path!())
    };
}

/// Registers a producer function under its own name.
///
/// ```ignore
/// register!(registry, velocity_profile);
/// ```
#[macro_export]
macro_rules! register {
    ($registry:expr, $func:ident) => {
        $registry.add(stringify!($func), module_path!(), $func)
    };
    ($registry:expr, $name:expr, $func:expr) => {
        $registry.add($name, module_path!(), $func)
    };
}
