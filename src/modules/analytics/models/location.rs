use crate::core::{AppError, Result};

/// A toll plaza known to the reporting views
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Plaza {
    pub id: i64,
    pub name: &'static str,
}

/// Symbolic plaza names and their numeric identifiers.
/// Views keyed by name use `name`, views keyed by id use `id`.
pub const PLAZAS: &[Plaza] = &[
    Plaza { id: 1, name: "CONGOMA" },
    Plaza { id: 2, name: "LOS ANGELES" },
];

/// Resolve a symbolic plaza name (case and surrounding whitespace ignored)
pub fn plaza_id_for(name: &str) -> Result<i64> {
    let wanted = name.trim().to_uppercase();
    PLAZAS
        .iter()
        .find(|plaza| plaza.name == wanted)
        .map(|plaza| plaza.id)
        .ok_or_else(|| {
            AppError::unmapped_location(format!("plaza name '{}' has no configured id", name.trim()))
        })
}

/// Reverse lookup used when a name-keyed view is filtered by id
pub fn plaza_name_for(id: i64) -> Result<&'static str> {
    PLAZAS
        .iter()
        .find(|plaza| plaza.id == id)
        .map(|plaza| plaza.name)
        .ok_or_else(|| AppError::unmapped_location(format!("plaza id {} has no configured name", id)))
}

/// Matches a name coming out of a view against the table
pub fn plaza_by_name(name: &str) -> Option<&'static Plaza> {
    let wanted = name.trim().to_uppercase();
    PLAZAS.iter().find(|plaza| plaza.name == wanted)
}

pub fn plaza_by_id(id: i64) -> Option<&'static Plaza> {
    PLAZAS.iter().find(|plaza| plaza.id == id)
}
