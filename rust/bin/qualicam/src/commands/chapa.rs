//! Form flows, driven through the app core exactly as the phone drives them.

use anyhow::Result;

use qualicam_app::request::*;
use qualicam_app::{AppRoute, ChapaFormState, Field, FormKind, ScanState, Screen, accept_scan};
use qualicam_client::ItemId;

use super::Session;

/// Look a code up and report the screen the app lands on.
pub async fn scan(session: &Session, code: &str) -> Result<()> {
    let Some(id) = accept_scan(code) else {
        anyhow::bail!("Not a chapa code: {:?} (expected 5 digits).", code);
    };
    session.connect().await?;
    navigate(session, &Screen::Scanner).await;

    let flux = session.app().flux();
    flux.emit(ScanDetectedReq::PATH, ScanDetectedReq { code: code.to_string() }).await;

    let scan: ScanState = flux.get_as(ScanState::PATH).unwrap_or_default();
    if let Some(e) = scan.error {
        anyhow::bail!(e);
    }
    let screen = flux.get_as::<AppRoute>(AppRoute::PATH).and_then(|r| r.screen());

    if session.json() {
        let form = match screen {
            Some(Screen::Edit(_)) => session.app().state_json(ChapaFormState::EDIT_PATH),
            _ => None,
        };
        let out = serde_json::json!({
            "route": session.app().state_json(AppRoute::PATH),
            "chapa": form.map(|f| f["fields"].clone()),
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    match screen {
        Some(Screen::Add(_)) => {
            println!("Chapa {} is not registered.", id);
            println!("Register it with: qualicam add {} --material .. --supplier .. --size .. --price .. --location ..", id);
        }
        Some(Screen::Edit(_)) => {
            let form = session.form(FormKind::Edit);
            println!("Chapa {} found.", id);
            print_fields(&form);
        }
        other => anyhow::bail!("Unexpected screen after scan: {:?}", other),
    }
    Ok(())
}

/// Register a new chapa.
pub async fn add(session: &Session, id: &str, values: Vec<(Field, String)>) -> Result<()> {
    let id = parse_id(id)?;
    session.connect().await?;
    navigate(session, &Screen::Add(id)).await;

    fill(session, FormKind::Add, values).await;
    session.app().flux().emit(AddSubmitReq::PATH, AddSubmitReq).await;
    report(session, FormKind::Add)
}

/// Change the given fields of an existing chapa.
pub async fn edit(session: &Session, id: &str, values: Vec<(Field, String)>) -> Result<()> {
    open_edit(session, id).await?;

    fill(session, FormKind::Edit, values).await;
    session.app().flux().emit(EditSubmitReq::PATH, EditSubmitReq).await;
    report(session, FormKind::Edit)
}

/// Create the retalho, then delete the chapa.
pub async fn convert(session: &Session, id: &str) -> Result<()> {
    open_edit(session, id).await?;

    session.app().flux().emit(EditConvertReq::PATH, EditConvertReq).await;
    let form = session.form(FormKind::Edit);
    if form.pending_delete {
        anyhow::bail!(
            "{}\nThe retalho exists; finish with: qualicam delete {} -y",
            form.error.unwrap_or_default(),
            form.id
        );
    }
    report(session, FormKind::Edit)
}

/// Delete a chapa.
pub async fn delete(session: &Session, id: &str) -> Result<()> {
    open_edit(session, id).await?;

    session.app().flux().emit(EditDeleteReq::PATH, EditDeleteReq).await;
    report(session, FormKind::Edit)
}

fn parse_id(id: &str) -> Result<ItemId> {
    ItemId::parse(id).map_err(|e| anyhow::anyhow!("{}", e))
}

async fn navigate(session: &Session, screen: &Screen) {
    let route = screen.route().0;
    session.app().flux().emit(NavigateReq::PATH, NavigateReq { route }).await;
}

/// Connect, enter the edit screen and wait for the record to load.
async fn open_edit(session: &Session, id: &str) -> Result<()> {
    let id = parse_id(id)?;
    session.connect().await?;
    navigate(session, &Screen::Edit(id)).await;

    let form = session.form(FormKind::Edit);
    if let Some(e) = form.error {
        anyhow::bail!("{} ({})", e, form.id);
    }
    Ok(())
}

async fn fill(session: &Session, form: FormKind, values: Vec<(Field, String)>) {
    let flux = session.app().flux();
    for (field, value) in values {
        let req = FormUpdateReq {
            form,
            field: field.name().to_string(),
            value,
        };
        flux.emit(FormUpdateReq::PATH, req).await;
    }
}

/// Turn the final form state into output or an error.
fn report(session: &Session, kind: FormKind) -> Result<()> {
    let form = session.form(kind);
    if let Some(e) = form.error {
        anyhow::bail!(e);
    }
    if session.json() {
        return session.print_state(kind.path());
    }
    if let Some(message) = &form.success {
        println!("{}", message);
    }
    Ok(())
}

fn print_fields(form: &ChapaFormState) {
    for field in Field::ALL {
        println!("{}: {}", field.label(), form.fields.get(field));
    }
}
