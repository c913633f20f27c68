// SPDX-FileCopyrightText: 2026 Meridian Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Subcommand implementations.
//!
//! Each command builds a serializable view from the composer and prints it
//! either as pretty JSON (`--json`) or as an aligned text table. Colors are
//! used only when stdout is a terminal and `--plain` is not set.

use std::io::IsTerminal;

use colored::Colorize;
use meridian_config::MeridianConfig;
use meridian_core::{MeridianError, PatientData};
use meridian_compose::SafetyReportEntry;
use serde::Serialize;

use crate::bootstrap::App;

/// Output mode shared by every command.
#[derive(Debug, Clone, Copy)]
pub struct Output {
    json: bool,
    color: bool,
}

impl Output {
    pub fn new(json: bool, plain: bool) -> Self {
        Self {
            json,
            color: !plain && std::io::stdout().is_terminal(),
        }
    }

    fn heading(&self, title: &str) {
        println!();
        if self.color {
            println!("  {}", title.bold());
        } else {
            println!("  {title}");
        }
        println!("  {}", "-".repeat(35));
    }

    fn json<T: Serialize>(&self, value: &T) -> Result<(), MeridianError> {
        println!("{}", serde_json::to_string_pretty(value)?);
        Ok(())
    }
}

/// Row of `meridian list`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModalitySummary {
    pub id: String,
    pub name: String,
    pub display_name: String,
    pub version: String,
    pub skill_level: String,
    pub protocols: usize,
    pub techniques: usize,
}

/// Output of `meridian stats`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsView {
    pub total_plugins: usize,
    pub total_protocols: usize,
    pub total_techniques: usize,
    pub loaded: Vec<String>,
    pub failed: Vec<String>,
    pub disabled: Vec<String>,
}

pub fn summaries(app: &App) -> Vec<ModalitySummary> {
    app.registry
        .all()
        .iter()
        .map(|plugin| {
            let metadata = plugin.metadata();
            ModalitySummary {
                id: metadata.id.clone(),
                name: metadata.name.clone(),
                display_name: metadata.display_name.clone(),
                version: metadata.version.clone(),
                skill_level: metadata.skill_level.to_string(),
                protocols: plugin.protocols().len(),
                techniques: plugin.techniques().len(),
            }
        })
        .collect()
}

pub fn stats_view(app: &App) -> StatsView {
    let stats = app.registry.stats();
    StatsView {
        total_plugins: stats.total_plugins,
        total_protocols: stats.total_protocols,
        total_techniques: stats.total_techniques,
        loaded: app.report.loaded.clone(),
        failed: app
            .report
            .failed
            .iter()
            .map(|f| f.plugin_id.clone())
            .collect(),
        disabled: app.report.disabled.clone(),
    }
}

pub fn list(app: &App, out: Output) -> Result<(), MeridianError> {
    let rows = summaries(app);
    if out.json {
        return out.json(&rows);
    }
    out.heading("meridian modalities");
    for row in &rows {
        println!(
            "    {:<14} {:<22} v{:<8} {:<12} {} protocols, {} techniques",
            row.id, row.display_name, row.version, row.skill_level, row.protocols, row.techniques
        );
    }
    println!();
    Ok(())
}

pub fn stats(app: &App, out: Output) -> Result<(), MeridianError> {
    let view = stats_view(app);
    if out.json {
        return out.json(&view);
    }
    out.heading("meridian stats");
    println!("    Plugins:    {}", view.total_plugins);
    println!("    Protocols:  {}", view.total_protocols);
    println!("    Techniques: {}", view.total_techniques);
    if !view.failed.is_empty() {
        let failed = view.failed.join(", ");
        if out.color {
            println!("    Failed:     {}", failed.red());
        } else {
            println!("    Failed:     {failed}");
        }
    }
    if !view.disabled.is_empty() {
        println!("    Disabled:   {}", view.disabled.join(", "));
    }
    println!();
    Ok(())
}

pub fn routes(app: &App, out: Output) -> Result<(), MeridianError> {
    let routes = app.composer.plugin_routes();
    if out.json {
        return out.json(&routes);
    }
    out.heading("meridian routes");
    for route in &routes {
        println!("    {:<32} -> {}", route.path, route.binding.as_str());
    }
    println!();
    Ok(())
}

pub fn nav(app: &App, out: Output) -> Result<(), MeridianError> {
    let items = app.composer.plugin_navigation();
    if out.json {
        return out.json(&items);
    }
    out.heading("meridian navigation");
    for item in &items {
        println!("    [{}] {:<24} {}", item.icon, item.name, item.path);
    }
    println!();
    Ok(())
}

pub fn cards(app: &App, indication: &str, out: Output) -> Result<(), MeridianError> {
    let cards = app.composer.modality_cards(indication);
    if out.json {
        return out.json(&cards);
    }
    out.heading(&format!("modalities for {indication}"));
    if cards.is_empty() {
        println!("    no modality treats this indication");
    }
    for card in &cards {
        println!(
            "    {:<22} {} protocol(s), effectiveness {:>3}  {}",
            card.metadata.display_name, card.protocol_count, card.effectiveness_score, card.link
        );
    }
    println!();
    Ok(())
}

pub fn compare(app: &App, indication: &str, out: Output) -> Result<(), MeridianError> {
    let rows = app.composer.comparison_table(indication);
    if out.json {
        return out.json(&rows);
    }
    out.heading(&format!("comparison for {indication}"));
    println!(
        "    {:<14} {:>6} {:>5} {:>7}  {:<16} {:<22} {}",
        "modality", "effect", "ease", "safety", "duration", "frequency", "cost"
    );
    for row in &rows {
        let m = &row.metrics;
        println!(
            "    {:<14} {:>6.1} {:>5} {:>7}  {:<16} {:<22} {}",
            row.id, m.effectiveness, m.ease_of_use, m.safety_profile, m.duration, m.frequency, m.cost
        );
    }
    println!();
    Ok(())
}

/// Screen `patient` against one modality or all of them.
pub fn safety_entries(
    app: &App,
    plugin: Option<&str>,
    patient: &PatientData,
) -> Result<Vec<SafetyReportEntry>, MeridianError> {
    match plugin {
        Some(id) => {
            let plugin = app
                .registry
                .get(id)
                .ok_or_else(|| MeridianError::PluginNotFound { id: id.to_string() })?;
            Ok(vec![SafetyReportEntry {
                id: plugin.id().to_string(),
                name: plugin.metadata().name.clone(),
                assessment: plugin.validate_safety_for_patient(patient),
            }])
        }
        None => Ok(app.composer.safety_report(patient)),
    }
}

pub fn safety(
    app: &App,
    plugin: Option<&str>,
    patient: &PatientData,
    out: Output,
) -> Result<(), MeridianError> {
    let entries = safety_entries(app, plugin, patient)?;
    if out.json {
        return out.json(&entries);
    }
    out.heading("meridian safety screen");
    for entry in &entries {
        let verdict = match (entry.assessment.safe, out.color) {
            (true, true) => format!("{} {}", "✓".green(), "safe".green()),
            (false, true) => format!("{} {}", "✗".red(), "unsafe".red()),
            (true, false) => "[OK] safe".to_string(),
            (false, false) => "[FAIL] unsafe".to_string(),
        };
        println!("    {:<14} {verdict}", entry.id);
        for warning in &entry.assessment.warnings {
            println!("      - {warning}");
        }
    }
    println!();
    Ok(())
}

pub fn search(app: &App, query: &str, out: Output) -> Result<(), MeridianError> {
    let ids: Vec<String> = app
        .registry
        .search(query)
        .iter()
        .map(|plugin| plugin.id().to_string())
        .collect();
    if out.json {
        return out.json(&ids);
    }
    out.heading(&format!("search: {query}"));
    if ids.is_empty() {
        println!("    no matches");
    }
    for id in &ids {
        println!("    {id}");
    }
    println!();
    Ok(())
}

pub fn show_config(config: &MeridianConfig, out: Output) -> Result<(), MeridianError> {
    if out.json {
        return out.json(config);
    }
    let rendered = toml::to_string_pretty(config)
        .map_err(|e| MeridianError::Config(format!("failed to render configuration: {e}")))?;
    print!("{rendered}");
    Ok(())
}
