//! Catalog loading and import.

use std::path::Path;

use super::types::ExerciseVariant;

/// An ordered list of exercise variants, unique by id.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    variants: Vec<ExerciseVariant>,
}

impl Catalog {
    /// Build a catalog from records, collapsing duplicate ids.
    ///
    /// A later record with an already seen id replaces the earlier one in its
    /// original position.
    pub fn new(variants: Vec<ExerciseVariant>) -> Self {
        let mut catalog = Self::default();
        for variant in variants {
            catalog.upsert(variant);
        }
        catalog
    }

    /// Parse a JSON array of variant records.
    pub fn from_json(text: &str) -> Result<Self, CatalogError> {
        let variants: Vec<ExerciseVariant> = serde_json::from_str(text)
            .map_err(|e| CatalogError::MalformedImport(e.to_string()))?;

        if let Some(position) = variants.iter().position(|v| v.id.trim().is_empty()) {
            return Err(CatalogError::MalformedImport(format!(
                "record {} has no id",
                position
            )));
        }

        let catalog = Self::new(variants);
        tracing::info!("Loaded catalog with {} variants", catalog.len());
        Ok(catalog)
    }

    /// Read and parse a catalog file.
    pub fn from_file(path: &Path) -> Result<Self, CatalogError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| CatalogError::Io(format!("{}: {}", path.display(), e)))?;
        Self::from_json(&content)
    }

    /// Merge an imported catalog into this one.
    ///
    /// Variants with known ids are replaced in place, new ones are appended.
    /// Returns the number of appended variants.
    pub fn merge(&mut self, other: Catalog) -> usize {
        let before = self.variants.len();
        for variant in other.variants {
            self.upsert(variant);
        }
        let added = self.variants.len() - before;
        tracing::info!("Merged import: {} new variants, {} total", added, self.len());
        added
    }

    /// Replace the whole catalog with an imported one.
    pub fn replace(&mut self, other: Catalog) {
        *self = other;
    }

    fn upsert(&mut self, variant: ExerciseVariant) {
        match self.variants.iter_mut().find(|v| v.id == variant.id) {
            Some(existing) => *existing = variant,
            None => self.variants.push(variant),
        }
    }

    /// Get a variant by id.
    pub fn get(&self, id: &str) -> Option<&ExerciseVariant> {
        self.variants.iter().find(|v| v.id == id)
    }

    /// All variants in load order.
    pub fn variants(&self) -> &[ExerciseVariant] {
        &self.variants
    }

    pub fn len(&self) -> usize {
        self.variants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variants.is_empty()
    }
}

/// Catalog loading errors.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("Malformed import: {0}")]
    MalformedImport(String),

    #[error("IO error: {0}")]
    Io(String),
}
