//! Textual output for routed connectors

use serde::Serialize;

use crate::connector::{Connector, Point};

/// Output format for a routed connector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// One `x,y` pair per line, leads first and last
    #[default]
    Text,
    /// TOML document with `lead_start`, `path` and `lead_end` arrays
    Toml,
}

#[derive(Serialize)]
struct TomlConnector {
    lead_start: Vec<[f64; 2]>,
    path: Vec<[f64; 2]>,
    lead_end: Vec<[f64; 2]>,
}

fn pair(p: &Point) -> [f64; 2] {
    [p.x, p.y]
}

fn coords(p: &Point) -> String {
    format!("{},{}", p.x, p.y)
}

/// Plain text listing of the connector
pub fn format_text(connector: &Connector) -> String {
    let [start_lead, end_lead] = &connector.leads;
    let mut out = String::new();
    out.push_str(&format!("lead {} -> {}\n", coords(&start_lead[0]), coords(&start_lead[1])));
    for p in &connector.path {
        out.push_str(&coords(p));
        out.push('\n');
    }
    out.push_str(&format!("lead {} -> {}\n", coords(&end_lead[0]), coords(&end_lead[1])));
    out
}

/// TOML rendering of the connector
pub fn format_toml(connector: &Connector) -> Result<String, toml::ser::Error> {
    let [start_lead, end_lead] = &connector.leads;
    toml::to_string(&TomlConnector {
        lead_start: start_lead.iter().map(pair).collect(),
        path: connector.path.iter().map(pair).collect(),
        lead_end: end_lead.iter().map(pair).collect(),
    })
}

/// Format `connector` in the requested format
pub fn format_connector(
    connector: &Connector,
    format: OutputFormat,
) -> Result<String, toml::ser::Error> {
    match format {
        OutputFormat::Text => Ok(format_text(connector)),
        OutputFormat::Toml => format_toml(connector),
    }
}
