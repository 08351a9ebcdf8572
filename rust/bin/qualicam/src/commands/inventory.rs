//! Read-only inventory queries against the saved server.

use anyhow::Result;
use serde::Serialize;

use qualicam_client::{Chapa, ItemId, Retalho};

use super::{Session, table};

const HEADER: [&str; 6] = ["ID", "MATERIAL", "FORNECEDOR", "TAMANHO", "PRECO", "LOCALIZACAO"];

/// Show one chapa.
pub async fn get(session: &Session, id: &str) -> Result<()> {
    let id = ItemId::parse(id).map_err(|e| anyhow::anyhow!("{}", e))?;
    let api = session.app().context().api();
    let Some(chapa) = api.get_chapa(id.as_str()).await? else {
        anyhow::bail!("Chapa {} not found.", id);
    };

    if session.json() {
        println!("{}", serde_json::to_string_pretty(&chapa)?);
    } else {
        println!("{}", table(&HEADER, &[chapa_row(&chapa)]));
    }
    Ok(())
}

pub async fn list_chapas(session: &Session) -> Result<()> {
    let items = session.app().context().api().list_chapas().await?;
    print_list(session, &items, chapa_row)
}

pub async fn list_retalhos(session: &Session) -> Result<()> {
    let items = session.app().context().api().list_retalhos().await?;
    print_list(session, &items, retalho_row)
}

fn print_list<T: Serialize>(session: &Session, items: &[T], row: impl Fn(&T) -> Vec<String>) -> Result<()> {
    if session.json() {
        println!("{}", serde_json::to_string_pretty(items)?);
        return Ok(());
    }
    if items.is_empty() {
        println!("No records.");
        return Ok(());
    }
    let rows: Vec<Vec<String>> = items.iter().map(row).collect();
    println!("{}", table(&HEADER, &rows));
    Ok(())
}

fn chapa_row(c: &Chapa) -> Vec<String> {
    row([&c.id, &c.nome_material, &c.fornecedor], c.tamanho, c.preco, &c.localizacao)
}

fn retalho_row(r: &Retalho) -> Vec<String> {
    row([&r.id, &r.nome_material, &r.fornecedor], r.tamanho, r.preco, &r.localizacao)
}

fn row(text: [&str; 3], tamanho: f64, preco: f64, localizacao: &str) -> Vec<String> {
    let mut cells: Vec<String> = text.iter().map(|s| s.to_string()).collect();
    cells.push(format!("{:.2}", tamanho));
    cells.push(format!("{:.2}", preco));
    cells.push(localizacao.to_string());
    cells
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rows_use_two_decimals() {
        let chapa = Chapa {
            id: "12345".into(),
            nome_material: "MDF Branco 18mm".into(),
            fornecedor: "Duratex".into(),
            tamanho: 5.06,
            preco: 289.9,
            localizacao: "A1".into(),
        };
        assert_eq!(chapa_row(&chapa), vec!["12345", "MDF Branco 18mm", "Duratex", "5.06", "289.90", "A1"]);
    }
}
