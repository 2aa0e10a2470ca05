//! Terminal menu
//!
//! Reads choices from any `BufRead` and writes to any `Write`, so the whole
//! loop runs the same against stdin/stdout or in-memory buffers.
//! End of input always ends the session.

use anyhow::Result;
use owo_colors::{OwoColorize, Style};
use std::io::{BufRead, Write};

use crate::agent::RiskAgent;
use crate::config::AppConfig;
use crate::engine::RuleEngine;
use crate::report::{export_csv, nutrient_summaries};
use crate::statistics::ColumnSummary;
use crate::store::{NutrientStore, RuleStore};
use crate::types::{ClassificationResult, NutrientColumn, RiskTier};

const RULE_WIDE: &str = "=========================================";
const RULE_THIN: &str = "-----------------------------------------";
const LIST_COLUMNS: usize = 3;
const MAX_MODES_SHOWN: usize = 3;

/// Top-level menu options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Analyze,
    ListFoods,
    ExportCsv,
    Statistics,
    Exit,
    Invalid,
}

impl MenuChoice {
    pub fn parse(input: &str) -> Self {
        match input.trim() {
            "1" => MenuChoice::Analyze,
            "2" => MenuChoice::ListFoods,
            "3" => MenuChoice::ExportCsv,
            "4" => MenuChoice::Statistics,
            "5" => MenuChoice::Exit,
            _ => MenuChoice::Invalid,
        }
    }
}

/// Capitalize the first letter of every word and lowercase the rest.
///
/// A word starts after any non-alphabetic character, so
/// "pao d'agua" becomes "Pao D'Agua".
pub fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_word = false;
    for c in text.chars() {
        if c.is_alphabetic() {
            if in_word {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            in_word = true;
        } else {
            out.push(c);
            in_word = false;
        }
    }
    out
}

pub fn tier_style(tier: RiskTier) -> Style {
    match tier {
        RiskTier::Red => Style::new().bright_red(),
        RiskTier::Yellow => Style::new().bright_yellow(),
        RiskTier::Green => Style::new().bright_green(),
        RiskTier::Gray => Style::new().bright_black(),
    }
}

/// `>>> TIER - label <<<`, colored by tier.
pub fn format_alert(tier: RiskTier, label: &str) -> String {
    format!(">>> {} - {} <<<", tier, label)
        .style(tier_style(tier))
        .to_string()
}

fn format_modes(mode: &Option<Vec<f64>>) -> String {
    match mode {
        None => "-".to_string(),
        Some(values) => {
            let mut shown: Vec<String> = values
                .iter()
                .take(MAX_MODES_SHOWN)
                .map(|v| format!("{:.2}", v))
                .collect();
            if values.len() > MAX_MODES_SHOWN {
                shown.push(format!("+{}", values.len() - MAX_MODES_SHOWN));
            }
            shown.join("/")
        }
    }
}

pub struct Menu<'a, S, I, O> {
    agent: RiskAgent<&'a S, &'a S>,
    store: &'a S,
    config: &'a AppConfig,
    input: I,
    output: O,
}

impl<'a, S, I, O> Menu<'a, S, I, O>
where
    S: NutrientStore + RuleStore,
    I: BufRead,
    O: Write,
{
    pub fn new(
        store: &'a S,
        engine: RuleEngine,
        config: &'a AppConfig,
        input: I,
        output: O,
    ) -> Self {
        Self {
            agent: RiskAgent::new(engine, store, store),
            store,
            config,
            input,
            output,
        }
    }

    pub fn into_output(self) -> O {
        self.output
    }

    /// Run until the user exits or input ends.
    pub fn run(&mut self) -> Result<()> {
        loop {
            self.clear_screen()?;
            self.print_menu()?;

            let Some(line) = self.read_line("Escolha uma opção: ")? else {
                break;
            };

            let keep_going = match MenuChoice::parse(&line) {
                MenuChoice::Analyze => self.analyze_food()?,
                MenuChoice::ListFoods => self.list_foods()?,
                MenuChoice::ExportCsv => self.export_report()?,
                MenuChoice::Statistics => self.show_statistics()?,
                MenuChoice::Exit => {
                    writeln!(
                        self.output,
                        "{}",
                        "\nEncerrando o Agente Nutricional. Até mais!".bright_blue()
                    )?;
                    false
                }
                MenuChoice::Invalid => {
                    writeln!(
                        self.output,
                        "{}",
                        "Opção inválida. Tente novamente.".bright_red()
                    )?;
                    self.pause()?
                }
            };

            if !keep_going {
                break;
            }
        }

        tracing::info!("menu closed");
        Ok(())
    }

    fn clear_screen(&mut self) -> Result<()> {
        if self.config.clear_screen {
            write!(self.output, "\x1B[2J\x1B[1;1H")?;
        }
        Ok(())
    }

    fn print_menu(&mut self) -> Result<()> {
        let out = &mut self.output;
        writeln!(out, "{}", RULE_WIDE.bright_blue())?;
        writeln!(out, "{}", "     AGENTE DE ALERTA NUTRICIONAL ".bright_magenta())?;
        writeln!(out, "{}", RULE_WIDE.bright_blue())?;
        writeln!(out, "{}. Analisar um Alimento (Decisão do Agente)", "1".bright_green())?;
        writeln!(out, "{}. Listar Alimentos Disponíveis", "2".bright_green())?;
        writeln!(out, "{}. Exportar Relatório CSV (Dados Brutos)", "3".bright_green())?;
        writeln!(
            out,
            "{}. Análise Estatística (Média, Desvio Padrão, Moda)",
            "4".bright_green()
        )?;
        writeln!(out, "{}. Sair", "5".bright_red())?;
        writeln!(out, "{}", RULE_THIN.bright_blue())?;
        Ok(())
    }

    /// Prompt and read one line. `None` at end of input.
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>> {
        write!(self.output, "{}", prompt)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    /// Wait for ENTER. Returns `false` at end of input.
    fn pause(&mut self) -> Result<bool> {
        let prompt = format!("\nPressione {} para continuar...", "ENTER".bright_blue());
        Ok(self.read_line(&prompt)?.is_some())
    }

    fn analyze_food(&mut self) -> Result<bool> {
        self.clear_screen()?;
        writeln!(self.output, "{}", "--- ANÁLISE NUTRICIONAL ---\n".bright_blue())?;

        let Some(raw) = self.read_line("Digite o nome do alimento para análise: ")? else {
            return Ok(false);
        };
        let raw = raw.trim();
        if raw.is_empty() {
            return Ok(true);
        }

        let name = title_case(raw);
        let mut outcome = self.agent.analyze(&name);
        if matches!(&outcome, Ok(r) if r.tier == RiskTier::Gray) && name != raw {
            outcome = self.agent.analyze(raw);
        }

        match outcome {
            Ok(result) => self.print_analysis(&name, &result)?,
            Err(e) => {
                tracing::warn!(food = %name, error = %e, "nutrient lookup failed");
                writeln!(
                    self.output,
                    "\n{} Falha ao consultar o alimento: {}",
                    "ERRO:".bright_red(),
                    e
                )?;
            }
        }

        self.pause()
    }

    fn print_analysis(&mut self, name: &str, result: &ClassificationResult) -> Result<()> {
        let out = &mut self.output;
        let p = &result.profile;

        writeln!(out, "\nAlimento Analisado: {}", name.to_uppercase().bright_blue())?;
        writeln!(out, "{}", RULE_THIN)?;
        writeln!(out, "{}", format_alert(result.tier, &result.label))?;
        writeln!(out, "Regra Ativada: {}", result.description)?;
        writeln!(out, "{}", RULE_THIN)?;

        writeln!(out, "{}", "DADOS POR 100g (Valores no BD):".bright_magenta())?;
        writeln!(out, "  > Sódio: {:.2} mg", p.sodium)?;
        writeln!(out, "  > Gordura Saturada: {:.2} g", p.saturated_fat)?;
        writeln!(out, "  > Carboidrato: {:.2} g", p.carbohydrate)?;
        writeln!(out, "  > Fibra: {:.2} g", p.fiber)?;
        writeln!(out, "  > Proteína: {:.2} g", p.protein)?;
        Ok(())
    }

    fn list_foods(&mut self) -> Result<bool> {
        self.clear_screen()?;
        writeln!(self.output, "{}", "--- ALIMENTOS DISPONÍVEIS ---\n".bright_blue())?;

        let names = match self.store.all_names() {
            Ok(names) => names,
            Err(e) => {
                writeln!(self.output, "{} {}", "ERRO:".bright_red(), e)?;
                return self.pause();
            }
        };

        if names.is_empty() {
            writeln!(
                self.output,
                "{}",
                "Nenhum alimento encontrado no banco de dados.".bright_red()
            )?;
            return self.pause();
        }

        let width = names.iter().map(|n| n.chars().count()).max().unwrap_or(0) + 3;
        for row in names.chunks(LIST_COLUMNS) {
            let line: String = row
                .iter()
                .map(|n| format!("{:<width$}", n, width = width))
                .collect();
            writeln!(self.output, "{}", line.trim_end())?;
        }
        writeln!(self.output)?;

        self.pause()
    }

    fn export_report(&mut self) -> Result<bool> {
        let path = self.config.report_csv.clone();
        match export_csv(self.store, &path) {
            Ok(rows) => writeln!(
                self.output,
                "\n{} Relatório exportado para {} ({} alimentos)",
                "SUCESSO:".bright_green(),
                path.display(),
                rows
            )?,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "report export failed");
                writeln!(
                    self.output,
                    "\n{} Não foi possível exportar o arquivo: {:#}",
                    "ERRO:".bright_red(),
                    e
                )?
            }
        }

        self.pause()
    }

    fn show_statistics(&mut self) -> Result<bool> {
        self.clear_screen()?;
        writeln!(
            self.output,
            "{}",
            "--- ANÁLISE ESTATÍSTICA NUTRICIONAL (DISPERSÃO) ---\n".bright_blue()
        )?;

        let summaries = match nutrient_summaries(self.store) {
            Ok(s) => s,
            Err(e) => {
                writeln!(self.output, "{} {:#}", "ERRO:".bright_red(), e)?;
                return self.pause();
            }
        };

        let count = summaries.first().map(|s| s.count).unwrap_or(0);
        writeln!(
            self.output,
            "{}\n",
            format!("Cálculos baseados em {} alimentos do BD.", count).bright_magenta()
        )?;

        writeln!(
            self.output,
            "{:<20}{:>10}{:>10}{:>15}{:>20}",
            "NUTRIENTE", "MÉDIA", "VAR.", "DESV. PADRÃO", "MODA"
        )?;
        writeln!(self.output, "{}", "=".repeat(75))?;
        for summary in &summaries {
            self.print_summary_row(summary)?;
        }

        let units: Vec<String> = NutrientColumn::ALL
            .iter()
            .map(|c| format!("{} ({})", c, c.unit()))
            .collect();
        writeln!(self.output, "\n*Unidades: {}.", units.join(", "))?;

        self.pause()
    }

    fn print_summary_row(&mut self, summary: &ColumnSummary) -> Result<()> {
        writeln!(
            self.output,
            "{:<20}{:>10.2}{:>10.2}{:>15.2}{:>20}",
            summary.column.column_name().to_uppercase(),
            summary.mean,
            summary.variance,
            summary.std_dev,
            format_modes(&summary.mode)
        )?;
        Ok(())
    }
}
