//! Chapa form requests.

use crate::state::FormKind;

/// Update one form field (`nomeMaterial`, `fornecedor`, `tamanho`, `preco`,
/// `localizacao`).
#[derive(Debug, Clone)]
pub struct FormUpdateReq {
    pub form: FormKind,
    pub field: String,
    pub value: String,
}

impl FormUpdateReq {
    pub const PATH: &'static str = "form/update-field";
}

/// Create the chapa from the add form.
#[derive(Debug, Clone)]
pub struct AddSubmitReq;

impl AddSubmitReq {
    pub const PATH: &'static str = "chapa/add/submit";
}

/// Fetch a chapa into the edit form.
#[derive(Debug, Clone)]
pub struct EditLoadReq {
    pub id: String,
}

impl EditLoadReq {
    pub const PATH: &'static str = "chapa/edit/load";
}

/// Save the edit form.
#[derive(Debug, Clone)]
pub struct EditSubmitReq;

impl EditSubmitReq {
    pub const PATH: &'static str = "chapa/edit/submit";
}

/// Turn the edited chapa into a retalho.
#[derive(Debug, Clone)]
pub struct EditConvertReq;

impl EditConvertReq {
    pub const PATH: &'static str = "chapa/edit/convert";
}

/// Delete the edited chapa. Also the retry after a partial conversion.
#[derive(Debug, Clone)]
pub struct EditDeleteReq;

impl EditDeleteReq {
    pub const PATH: &'static str = "chapa/edit/delete";
}
