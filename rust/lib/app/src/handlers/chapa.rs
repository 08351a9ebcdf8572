//! Add/edit form handlers.

use tracing::{debug, info, warn};

use qualicam_flux::StateStore;

use crate::context::AppContext;
use crate::convert::{ConversionError, convert_to_retalho};
use crate::form::{ChapaFields, Field};
use crate::handlers::app::enter;
use crate::request::*;
use crate::state::*;

fn form(store: &StateStore, kind: FormKind) -> ChapaFormState {
    store.get_as::<ChapaFormState>(kind.path()).unwrap_or_default()
}

/// Mark the form busy, clearing previous messages.
fn begin(store: &StateStore, kind: FormKind, state: &mut ChapaFormState) {
    state.busy = true;
    state.error = None;
    state.success = None;
    store.set(kind.path(), state.clone());
}

fn fail(store: &StateStore, kind: FormKind, mut state: ChapaFormState, message: String) {
    // Keep edits typed while the request was in flight.
    state.fields = form(store, kind).fields;
    state.busy = false;
    state.error = Some(message);
    store.set(kind.path(), state);
}

/// Record success and go back to the scanner.
fn finish(store: &StateStore, ctx: &AppContext, kind: FormKind, mut state: ChapaFormState, message: &str) {
    state.busy = false;
    state.error = None;
    state.success = Some(message.to_string());
    state.done = true;
    state.pending_delete = false;
    store.set(kind.path(), state);
    enter(store, ctx, &Screen::Scanner);
}

/// Handle `form/update-field`.
pub async fn handle_update_field(req: &FormUpdateReq, store: &StateStore) {
    let Some(field) = Field::from_name(&req.field) else {
        debug!(field = %req.field, "unknown form field");
        return;
    };
    store.update::<ChapaFormState, _>(req.form.path(), |state| {
        state.fields.set(field, req.value.clone());
        state.error = None;
        state.success = None;
    });
}

/// Handle `chapa/add/submit`.
pub async fn handle_add_submit(store: &StateStore, ctx: &AppContext) {
    let kind = FormKind::Add;
    let mut state = form(store, kind);
    if state.busy {
        return;
    }
    let chapa = match state.fields.to_chapa(&state.id) {
        Ok(chapa) => chapa,
        Err(e) => return fail(store, kind, state, e.to_string()),
    };

    let epoch = ctx.epoch();
    begin(store, kind, &mut state);
    let result = ctx.api().create_chapa(&chapa).await;
    if !ctx.is_current(epoch) {
        warn!(id = %chapa.id, "discarding add result for a screen that was left");
        return;
    }

    match result {
        Ok(_) => {
            info!(id = %chapa.id, "chapa added");
            finish(store, ctx, kind, state, "Chapa adicionada com sucesso!");
        }
        Err(e) => fail(store, kind, state, format!("Erro ao salvar chapa: {}", e)),
    }
}

/// Handle `chapa/edit/load`.
pub async fn handle_edit_load(req: &EditLoadReq, store: &StateStore, ctx: &AppContext) {
    let kind = FormKind::Edit;
    let mut state = ChapaFormState::new(req.id.as_str());
    let epoch = ctx.epoch();
    begin(store, kind, &mut state);

    let result = ctx.api().get_chapa(&req.id).await;
    if !ctx.is_current(epoch) {
        warn!(id = %req.id, "discarding load result for a screen that was left");
        return;
    }

    match result {
        Ok(Some(chapa)) => {
            state.fields = ChapaFields::from_chapa(&chapa);
            state.busy = false;
            store.set(kind.path(), state);
        }
        Ok(None) => fail(store, kind, state, "Chapa não encontrada".into()),
        Err(e) => fail(store, kind, state, format!("Erro ao carregar chapa: {}", e)),
    }
}

/// Handle `chapa/edit/submit`.
pub async fn handle_edit_submit(store: &StateStore, ctx: &AppContext) {
    let kind = FormKind::Edit;
    let mut state = form(store, kind);
    if state.busy {
        return;
    }
    let chapa = match state.fields.to_chapa(&state.id) {
        Ok(chapa) => chapa,
        Err(e) => return fail(store, kind, state, e.to_string()),
    };

    let epoch = ctx.epoch();
    begin(store, kind, &mut state);
    let result = ctx.api().update_chapa(&chapa.id, &chapa).await;
    if !ctx.is_current(epoch) {
        warn!(id = %chapa.id, "discarding update result for a screen that was left");
        return;
    }

    match result {
        Ok(_) => {
            info!(id = %chapa.id, "chapa updated");
            finish(store, ctx, kind, state, "Chapa atualizada com sucesso!");
        }
        Err(e) => fail(store, kind, state, format!("Erro ao atualizar chapa: {}", e)),
    }
}

/// Handle `chapa/edit/convert`.
pub async fn handle_edit_convert(store: &StateStore, ctx: &AppContext) {
    let kind = FormKind::Edit;
    let mut state = form(store, kind);
    if state.busy {
        return;
    }
    if state.pending_delete {
        debug!(id = %state.id, "retalho already created, retrying delete");
        return handle_edit_delete(store, ctx).await;
    }
    if let Err(e) = state.fields.to_chapa(&state.id) {
        return fail(store, kind, state, e.to_string());
    }

    let epoch = ctx.epoch();
    begin(store, kind, &mut state);
    let api = ctx.api();
    let result = convert_to_retalho(api.as_ref(), &state.id, &state.fields).await;
    if !ctx.is_current(epoch) {
        warn!(id = %state.id, "discarding conversion result for a screen that was left");
        return;
    }

    match result {
        Ok(_) => finish(store, ctx, kind, state, "Chapa transformada em retalho com sucesso!"),
        Err(e) => {
            state.pending_delete = e.is_partial();
            if let ConversionError::Delete { .. } = &e {
                warn!(id = %state.id, "retalho exists, chapa delete pending");
            }
            fail(store, kind, state, e.to_string());
        }
    }
}

/// Handle `chapa/edit/delete`.
pub async fn handle_edit_delete(store: &StateStore, ctx: &AppContext) {
    let kind = FormKind::Edit;
    let mut state = form(store, kind);
    if state.busy || state.id.is_empty() {
        return;
    }

    let epoch = ctx.epoch();
    begin(store, kind, &mut state);
    let result = ctx.api().delete_chapa(&state.id).await;
    if !ctx.is_current(epoch) {
        warn!(id = %state.id, "discarding delete result for a screen that was left");
        return;
    }

    match result {
        Ok(()) => {
            info!(id = %state.id, "chapa deleted");
            let message = if state.pending_delete {
                "Chapa transformada em retalho com sucesso!"
            } else {
                "Chapa removida com sucesso!"
            };
            finish(store, ctx, kind, state, message);
        }
        Err(e) => fail(store, kind, state, format!("Erro ao remover chapa: {}", e)),
    }
}
