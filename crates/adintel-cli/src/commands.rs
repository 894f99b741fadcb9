//! Command handlers. Input is a JSON array of ads; output is JSON on stdout.

use std::io::{Read, Write};
use std::path::Path;

use adintel_analysis::{CategorizationResult, IntelPipeline};
use adintel_core::{Ad, AppConfig};
use anyhow::Context;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// One ad's classification with the signals behind it.
#[derive(Debug, Serialize)]
pub(crate) struct Explained {
    pub id: String,
    #[serde(flatten)]
    pub result: CategorizationResult,
}

pub(crate) fn run_analyze(
    config: &AppConfig,
    input: &Path,
    competitor: &str,
    industry: Option<&str>,
    as_of: Option<DateTime<Utc>>,
    pretty: bool,
) -> anyhow::Result<()> {
    let mut pipeline = IntelPipeline::from_config(config).context("failed to build pipeline")?;
    if let Some(as_of) = as_of {
        pipeline = pipeline.with_reference_time(as_of);
    }

    let ads = read_ads(input)?;
    tracing::info!(ads = ads.len(), competitor, "analyzing ads");
    let classified = pipeline.classify(&ads).context("ad validation failed")?;
    let report = pipeline.analyze(competitor, &classified, industry);
    write_json(&report, pretty)
}

pub(crate) fn run_categorize(
    config: &AppConfig,
    input: &Path,
    explain: bool,
    pretty: bool,
) -> anyhow::Result<()> {
    let pipeline = IntelPipeline::from_config(config).context("failed to build pipeline")?;
    let ads = read_ads(input)?;
    tracing::info!(ads = ads.len(), "categorizing ads");

    if explain {
        for ad in &ads {
            ad.validate().context("ad validation failed")?;
        }
        let explained: Vec<Explained> = ads
            .iter()
            .map(|ad| Explained {
                id: ad.id.clone(),
                result: pipeline.classifier().categorize(ad),
            })
            .collect();
        return write_json(&explained, pretty);
    }

    let classified = pipeline.classify(&ads).context("ad validation failed")?;
    write_json(&classified, pretty)
}

/// Read a JSON array of ads from a file, or from stdin when `input` is `-`.
pub(crate) fn read_ads(input: &Path) -> anyhow::Result<Vec<Ad>> {
    let raw = if input.as_os_str() == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("failed to read ads from stdin")?;
        buf
    } else {
        std::fs::read_to_string(input)
            .with_context(|| format!("failed to read {}", input.display()))?
    };
    parse_ads(&raw).with_context(|| format!("failed to parse ads from {}", input.display()))
}

pub(crate) fn parse_ads(raw: &str) -> anyhow::Result<Vec<Ad>> {
    Ok(serde_json::from_str(raw)?)
}

fn write_json<T: Serialize>(value: &T, pretty: bool) -> anyhow::Result<()> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    if pretty {
        serde_json::to_writer_pretty(&mut out, value)?;
    } else {
        serde_json::to_writer(&mut out, value)?;
    }
    writeln!(out)?;
    Ok(())
}
