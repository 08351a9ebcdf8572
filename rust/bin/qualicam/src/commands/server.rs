use anyhow::Result;

use qualicam_app::request::{InitializeReq, SaveServerReq};
use qualicam_app::{Connection, HomeState};

use super::Session;

/// Show the saved address.
pub fn show(session: &Session) -> Result<()> {
    let address = session.app().context().location.address();
    if session.json() {
        println!("{}", serde_json::json!({ "serverUrl": address }));
    } else {
        println!("Server:    {}", address);
    }
    Ok(())
}

/// Test the saved address.
pub async fn status(session: &Session) -> Result<()> {
    let flux = session.app().flux();
    flux.emit(InitializeReq::PATH, InitializeReq).await;

    if session.json() {
        return session.print_state(HomeState::PATH);
    }
    print_home(&session.home());
    Ok(())
}

/// Save a new address, then test it.
pub async fn set(session: &Session, url: &str) -> Result<()> {
    let flux = session.app().flux();
    flux.emit(SaveServerReq::PATH, SaveServerReq { url: url.to_string() }).await;

    let home = session.home();
    if home.connection == Connection::Idle {
        // Not saved.
        anyhow::bail!("{}", home.error.unwrap_or_else(|| "Endereço inválido".into()));
    }

    if session.json() {
        return session.print_state(HomeState::PATH);
    }
    println!("Server address saved.");
    print_home(&home);
    Ok(())
}

fn print_home(home: &HomeState) {
    println!("Server:    {}", home.server_url);
    match (&home.connection, &home.error) {
        (Connection::Connected, _) => println!("Status:    connected"),
        (_, Some(e)) => println!("Status:    disconnected ({})", e),
        (c, None) => println!("Status:    {:?}", c),
    }
}
