//! Materials library views: filtered browsing and usage statistics.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::api::{Material, UserId};
use crate::db::repository::{FullRepository, RepositoryResult};

const MOST_USED_LIMIT: usize = 5;

/// Value that disables a filter, as sent by a client's "All" option.
const ALL: &str = "All";

/// Optional narrowing of the materials list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct MaterialFilter {
    /// Exact category name.
    #[serde(default)]
    pub category: Option<String>,
    /// Case-insensitive substring of the name or description.
    #[serde(default)]
    pub q: Option<String>,
}

/// `None` for an absent, blank or "All" filter value.
pub(crate) fn active(value: &Option<String>) -> Option<&str> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty() && *v != ALL)
}

impl MaterialFilter {
    pub fn matches(&self, material: &Material) -> bool {
        if let Some(category) = active(&self.category) {
            if material.category != category {
                return false;
            }
        }
        if let Some(q) = active(&self.q) {
            let q = q.to_lowercase();
            if !material.name.to_lowercase().contains(&q)
                && !material.description.to_lowercase().contains(&q)
            {
                return false;
            }
        }
        true
    }

    pub fn apply(&self, materials: Vec<Material>) -> Vec<Material> {
        materials.into_iter().filter(|m| self.matches(m)).collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryUsage {
    pub category: String,
    pub materials: usize,
    pub uses: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MaterialStats {
    pub total_materials: usize,
    pub total_uses: i64,
    pub in_stock: usize,
    /// One row per category, sorted by name.
    pub by_category: Vec<CategoryUsage>,
    /// Up to five materials, most used first; ties keep list order.
    pub most_used: Vec<Material>,
}

pub fn material_stats(materials: &[Material]) -> MaterialStats {
    let mut categories: BTreeMap<&str, (usize, i64)> = BTreeMap::new();
    for material in materials {
        let slot = categories.entry(material.category.as_str()).or_default();
        slot.0 += 1;
        slot.1 += i64::from(material.times_used);
    }

    let mut most_used: Vec<Material> = materials.to_vec();
    most_used.sort_by(|a, b| b.times_used.cmp(&a.times_used));
    most_used.truncate(MOST_USED_LIMIT);

    MaterialStats {
        total_materials: materials.len(),
        total_uses: materials.iter().map(|m| i64::from(m.times_used)).sum(),
        in_stock: materials.iter().filter(|m| m.in_stock).count(),
        by_category: categories
            .into_iter()
            .map(|(category, (materials, uses))| CategoryUsage {
                category: category.to_string(),
                materials,
                uses,
            })
            .collect(),
        most_used,
    }
}

pub async fn usage_statistics<R: FullRepository + ?Sized>(
    repo: &R,
    user: UserId,
) -> RepositoryResult<MaterialStats> {
    let materials = repo.list_materials(user).await?;
    Ok(material_stats(&materials))
}
