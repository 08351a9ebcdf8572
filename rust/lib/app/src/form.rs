//! Chapa form input: the five editable fields as typed by the user.

use std::fmt;

use serde::{Deserialize, Serialize};

use qualicam_client::{Chapa, ItemId};

/// One editable field of a chapa form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    NomeMaterial,
    Fornecedor,
    Tamanho,
    Preco,
    Localizacao,
}

impl Field {
    pub const ALL: [Field; 5] = [
        Field::NomeMaterial,
        Field::Fornecedor,
        Field::Tamanho,
        Field::Preco,
        Field::Localizacao,
    ];

    /// Wire name, as used by `form/update-field` and the JSON record.
    pub fn name(self) -> &'static str {
        match self {
            Field::NomeMaterial => "nomeMaterial",
            Field::Fornecedor => "fornecedor",
            Field::Tamanho => "tamanho",
            Field::Preco => "preco",
            Field::Localizacao => "localizacao",
        }
    }

    /// Form label shown to the user.
    pub fn label(self) -> &'static str {
        match self {
            Field::NomeMaterial => "Nome do Material",
            Field::Fornecedor => "Fornecedor",
            Field::Tamanho => "Tamanho (m²)",
            Field::Preco => "Preço (R$/m²)",
            Field::Localizacao => "Localização",
        }
    }

    pub fn from_name(name: &str) -> Option<Field> {
        Field::ALL.into_iter().find(|f| f.name() == name)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Local input error, reported before any network call.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("campo obrigatório: {0}")]
    Missing(Field),

    #[error("{field} deve ser um número válido (recebido {value:?})")]
    NotANumber { field: Field, value: String },

    #[error("ID da chapa inválido: {0:?} (esperado 5 dígitos)")]
    InvalidId(String),
}

/// Raw form values, exactly as typed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChapaFields {
    pub nome_material: String,
    pub fornecedor: String,
    pub tamanho: String,
    pub preco: String,
    pub localizacao: String,
}

impl ChapaFields {
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::NomeMaterial => &self.nome_material,
            Field::Fornecedor => &self.fornecedor,
            Field::Tamanho => &self.tamanho,
            Field::Preco => &self.preco,
            Field::Localizacao => &self.localizacao,
        }
    }

    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        let slot = match field {
            Field::NomeMaterial => &mut self.nome_material,
            Field::Fornecedor => &mut self.fornecedor,
            Field::Tamanho => &mut self.tamanho,
            Field::Preco => &mut self.preco,
            Field::Localizacao => &mut self.localizacao,
        };
        *slot = value.into();
    }

    /// All five fields are non-blank.
    pub fn is_complete(&self) -> bool {
        Field::ALL.iter().all(|f| !self.get(*f).trim().is_empty())
    }

    /// Complete, and both numeric fields parse.
    pub fn is_valid(&self) -> bool {
        self.is_complete()
            && parse_number(&self.tamanho).is_some()
            && parse_number(&self.preco).is_some()
    }

    /// Build the record for `id`. Text fields are sent as typed.
    pub fn to_chapa(&self, id: &str) -> Result<Chapa, ValidationError> {
        let id = ItemId::parse(id).map_err(|e| ValidationError::InvalidId(e.0))?;
        if let Some(field) = Field::ALL.into_iter().find(|f| self.get(*f).trim().is_empty()) {
            return Err(ValidationError::Missing(field));
        }
        Ok(Chapa {
            id: id.as_str().to_string(),
            nome_material: self.nome_material.clone(),
            fornecedor: self.fornecedor.clone(),
            tamanho: self.number(Field::Tamanho)?,
            preco: self.number(Field::Preco)?,
            localizacao: self.localizacao.clone(),
        })
    }

    pub fn from_chapa(chapa: &Chapa) -> Self {
        Self {
            nome_material: chapa.nome_material.clone(),
            fornecedor: chapa.fornecedor.clone(),
            tamanho: chapa.tamanho.to_string(),
            preco: chapa.preco.to_string(),
            localizacao: chapa.localizacao.clone(),
        }
    }

    fn number(&self, field: Field) -> Result<f64, ValidationError> {
        let raw = self.get(field);
        parse_number(raw).ok_or_else(|| ValidationError::NotANumber {
            field,
            value: raw.to_string(),
        })
    }
}

/// Decimal input as typed on a phone keypad: `2.75`, `2,75`, ` 3 `.
fn parse_number(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    let normalized = if trimmed.contains(',') && !trimmed.contains('.') {
        trimmed.replace(',', ".")
    } else {
        trimmed.to_string()
    };
    normalized.parse::<f64>().ok().filter(|n| n.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> ChapaFields {
        ChapaFields {
            nome_material: "MDF Branco".into(),
            fornecedor: "Duratex".into(),
            tamanho: "2.75".into(),
            preco: "189,90".into(),
            localizacao: "Galpão A".into(),
        }
    }

    #[test]
    fn complete_and_valid() {
        let fields = filled();
        assert!(fields.is_complete());
        assert!(fields.is_valid());

        let chapa = fields.to_chapa("12345").unwrap();
        assert_eq!(chapa.id, "12345");
        assert_eq!(chapa.tamanho, 2.75);
        assert_eq!(chapa.preco, 189.9);
        assert_eq!(chapa.localizacao, "Galpão A");
    }

    #[test]
    fn blank_field_is_missing() {
        for field in Field::ALL {
            let mut fields = filled();
            fields.set(field, "   ");
            assert!(!fields.is_complete(), "{field:?}");
            assert!(!fields.is_valid());
            assert_eq!(fields.to_chapa("12345"), Err(ValidationError::Missing(field)));
        }
    }

    #[test]
    fn non_numeric_size_is_rejected() {
        let mut fields = filled();
        fields.tamanho = "abc".into();
        assert!(fields.is_complete());
        assert!(!fields.is_valid());
        assert_eq!(
            fields.to_chapa("12345"),
            Err(ValidationError::NotANumber {
                field: Field::Tamanho,
                value: "abc".into()
            })
        );
    }

    #[test]
    fn number_parsing_rules() {
        assert_eq!(parse_number(" 3 "), Some(3.0));
        assert_eq!(parse_number("2,5"), Some(2.5));
        assert_eq!(parse_number("1,234.5"), None);
        assert_eq!(parse_number("NaN"), None);
        assert_eq!(parse_number("inf"), None);
        assert_eq!(parse_number(""), None);
    }

    #[test]
    fn bad_id_is_rejected_first() {
        let err = ChapaFields::default().to_chapa("12a45").unwrap_err();
        assert_eq!(err, ValidationError::InvalidId("12a45".into()));
    }

    #[test]
    fn load_from_record() {
        let chapa = filled().to_chapa("00042").unwrap();
        let fields = ChapaFields::from_chapa(&chapa);
        assert_eq!(fields.nome_material, "MDF Branco");
        assert_eq!(fields.tamanho, "2.75");
        assert_eq!(fields.preco, "189.9");
        assert!(fields.is_valid());
    }

    #[test]
    fn field_names_round_trip() {
        for field in Field::ALL {
            assert_eq!(Field::from_name(field.name()), Some(field));
        }
        assert_eq!(Field::from_name("id"), None);
    }
}
