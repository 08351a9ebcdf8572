pub mod chapa;
pub mod inventory;
pub mod server;

use anyhow::Result;

use qualicam_app::request::InitializeReq;
use qualicam_app::{ChapaFormState, FormKind, HomeState, QualiCamApp, ServerLocation};

/// One CLI invocation: the app core plus the chosen output format.
pub struct Session {
    app: QualiCamApp,
    json: bool,
}

impl Session {
    pub fn new(location: ServerLocation, json: bool) -> Self {
        Self {
            app: QualiCamApp::new(location),
            json,
        }
    }

    pub fn app(&self) -> &QualiCamApp {
        &self.app
    }

    pub fn json(&self) -> bool {
        self.json
    }

    pub fn home(&self) -> HomeState {
        self.app.flux().get_as(HomeState::PATH).unwrap_or_default()
    }

    pub fn form(&self, kind: FormKind) -> ChapaFormState {
        self.app.flux().get_as(kind.path()).unwrap_or_default()
    }

    /// Start the app and require a reachable server.
    pub async fn connect(&self) -> Result<HomeState> {
        self.app.flux().emit(InitializeReq::PATH, InitializeReq).await;
        let home = self.home();
        if !home.connection.can_scan() {
            let reason = home.error.as_deref().unwrap_or("sem resposta");
            anyhow::bail!("Server {} is not reachable: {}", home.server_url, reason);
        }
        Ok(home)
    }

    /// Print the state at `path` as pretty JSON.
    pub fn print_state(&self, path: &str) -> Result<()> {
        let value = self.app.state_json(path).unwrap_or(serde_json::Value::Null);
        println!("{}", serde_json::to_string_pretty(&value)?);
        Ok(())
    }
}

/// Left-aligned columns, two spaces apart.
pub fn table(header: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = header.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            if let Some(w) = widths.get_mut(i) {
                *w = (*w).max(cell.chars().count());
            }
        }
    }

    let line = |cells: Vec<&str>| {
        let padded: Vec<String> = cells
            .iter()
            .zip(&widths)
            .map(|(cell, w)| format!("{:<width$}", cell, width = *w))
            .collect();
        padded.join("  ").trim_end().to_string()
    };

    let mut out = vec![line(header.to_vec())];
    out.extend(rows.iter().map(|row| line(row.iter().map(String::as_str).collect())));
    out.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_aligns_columns() {
        let rows = vec![
            vec!["12345".to_string(), "MDF Branco".to_string(), "A1".to_string()],
            vec!["00042".to_string(), "Compensado".to_string(), "Galpão B".to_string()],
        ];
        let out = table(&["ID", "MATERIAL", "LOCAL"], &rows);
        assert_eq!(
            out,
            "ID     MATERIAL    LOCAL\n\
             12345  MDF Branco  A1\n\
             00042  Compensado  Galpão B"
        );
    }

    #[test]
    fn table_without_rows_is_just_the_header() {
        assert_eq!(table(&["ID", "MATERIAL"], &[]), "ID  MATERIAL");
    }
}
