//! Import table construction and namespace resolution.
//!
//! The table maps each import's key to the clause text that re-declares it
//! in generated code. Keys follow Go's naming rules for an import: an
//! explicit alias, the blank alias `_`, or the unquoted path when no alias
//! is given. Later declarations with the same key replace earlier ones.

use std::collections::BTreeMap;

use crate::syntax::ImportSpec;

const BLANK: &str = "_";
const DOT: &str = ".";

/// Lookup from import key to the clause that reproduces the import.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportTable {
    entries: BTreeMap<String, ImportEntry>,
}

/// A single entry of the [`ImportTable`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportEntry {
    clause: String,
    derived_name: Option<String>,
    declared_at: usize,
}

impl ImportEntry {
    /// Clause text without the `import` keyword, for example `pb "x/y/pb"`.
    #[must_use]
    pub fn clause(&self) -> &str {
        &self.clause
    }
}

impl ImportTable {
    /// Builds the table from import specs in file order.
    #[must_use]
    pub fn from_specs(specs: &[ImportSpec]) -> Self {
        let mut entries = BTreeMap::new();
        for (declared_at, spec) in specs.iter().enumerate() {
            let (key, entry) = match spec.alias.as_deref() {
                Some(alias) => (
                    alias.to_owned(),
                    ImportEntry {
                        clause: format!("{alias} {}", spec.quoted_path()),
                        derived_name: None,
                        declared_at,
                    },
                ),
                None => (
                    spec.path.clone(),
                    ImportEntry {
                        clause: spec.quoted_path(),
                        derived_name: Some(package_name_for_path(&spec.path).to_owned()),
                        declared_at,
                    },
                ),
            };
            entries.insert(key, entry);
        }
        Self { entries }
    }

    /// Number of distinct keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the source declared no imports.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Looks up an entry by its exact key, including `_` and `.`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&ImportEntry> {
        self.entries.get(key)
    }

    /// Finds the import that makes `namespace` usable as a type qualifier.
    ///
    /// An exact key match wins. Failing that, the most recently declared
    /// unaliased import whose path-derived package name equals `namespace`
    /// is used. Blank and dot imports never resolve a namespace.
    #[must_use]
    pub fn resolve(&self, namespace: &str) -> Option<&ImportEntry> {
        if namespace == BLANK || namespace == DOT {
            return None;
        }
        self.entries.get(namespace).or_else(|| {
            self.entries
                .values()
                .filter(|entry| entry.derived_name.as_deref() == Some(namespace))
                .max_by_key(|entry| entry.declared_at)
        })
    }
}

/// Derives the package name Go assigns to an unaliased import path.
///
/// Takes the last path element, skipping a trailing major-version element
/// such as `v2`, drops a leading `go-` and cuts at the first character that
/// cannot appear in an identifier. So `github.com/mattn/go-sqlite3` gives
/// `sqlite3` and `gopkg.in/yaml.v3` gives `yaml`.
#[must_use]
pub fn package_name_for_path(path: &str) -> &str {
    let mut elements = path.rsplit('/').filter(|element| !element.is_empty());
    let last = elements.next().unwrap_or(path);
    let base = if is_major_version(last) {
        elements.next().unwrap_or(last)
    } else {
        last
    };
    let stem = base.strip_prefix("go-").unwrap_or(base);
    stem.split(|ch: char| !(ch.is_alphanumeric() || ch == '_'))
        .next()
        .unwrap_or(stem)
}

fn is_major_version(element: &str) -> bool {
    element.strip_prefix('v').is_some_and(is_digits)
}

fn is_digits(text: &str) -> bool {
    !text.is_empty() && text.chars().all(|ch| ch.is_ascii_digit())
}
