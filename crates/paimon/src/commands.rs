//! CLI command implementations.

use std::net::IpAddr;
use std::sync::Arc;

use color_eyre::eyre::{eyre, Result, WrapErr};

use malphas::{Malphas, ModelRegistry};
use paimon_core::{Context, Error, GenerationMeta, ModelSpec};
use paimon_server::Server;

use crate::config::Config;

/// Builds the pipeline, optionally overriding the startup model.
pub fn build_pipeline(cfg: &Config, model: Option<&str>) -> Result<Malphas> {
    let malphas = Malphas::new(cfg.pipeline())
        .wrap_err_with(|| format!("Failed to start pipeline with model '{}'", cfg.model()))?;

    if let Some(model) = model {
        if !malphas.set_active_model(model) {
            return Err(Error::model_not_found(model)).wrap_err_with(|| {
                format!(
                    "Unknown model '{model}'. Available: {}",
                    model_names(malphas.list_models())
                )
            });
        }
    }

    Ok(malphas)
}

/// Start the HTTP server.
pub async fn serve(cfg: &Config, host: String, port: u16) -> Result<()> {
    let host: IpAddr = host
        .parse()
        .map_err(|e| eyre!("Invalid host '{host}': {e}"))?;

    tracing::info!("Starting Paimon server...");

    let malphas = build_pipeline(cfg, None)?;
    let server = Server::new(cfg.server(host, port), Arc::new(malphas));
    server.run().await?;

    Ok(())
}

/// Answer a question and print the answer, contexts and metadata.
pub async fn ask(
    cfg: &Config,
    query: &str,
    top_k: Option<i64>,
    model: Option<&str>,
    json: bool,
) -> Result<()> {
    let malphas = build_pipeline(cfg, model)?;
    let answer = malphas.answer(query, top_k).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&answer)?);
        return Ok(());
    }

    println!("{}\n", answer.answer);
    println!("Contexts:");
    print!("{}", format_contexts(&answer.contexts));
    println!();
    println!("{}", format_meta(&answer.meta));

    Ok(())
}

/// Print the ranked contexts for a query.
pub fn search(cfg: &Config, query: &str, top_k: Option<i64>, json: bool) -> Result<()> {
    let malphas = build_pipeline(cfg, None)?;
    let top_k = top_k.unwrap_or_else(|| i64::try_from(cfg.top_k).unwrap_or(i64::MAX));
    let contexts = malphas.retrieve(query, top_k)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&contexts)?);
    } else {
        print!("{}", format_contexts(&contexts));
    }

    Ok(())
}

/// List the model catalog, marking the configured model.
pub fn model_list(cfg: &Config) -> Result<()> {
    let malphas = build_pipeline(cfg, None)?;
    let active = &malphas.active_model().name;

    println!("Available models:\n");
    for model in malphas.list_models() {
        let marker = if &model.name == active { "*" } else { " " };
        println!(
            "{marker} {:<14} {:<11} {}",
            model.name,
            model.style.as_str(),
            model.description
        );
    }
    println!("\n* active at startup");

    Ok(())
}

/// Validate and persist the default model.
pub fn config_set_model(model: &str) -> Result<()> {
    let registry = ModelRegistry::default();
    if !registry.contains(model) {
        return Err(Error::model_not_found(model)).wrap_err_with(|| {
            format!(
                "Unknown model '{model}'. Available: {}",
                model_names(registry.list_models())
            )
        });
    }

    let mut cfg = Config::load();
    cfg.set_default_model(model)
        .wrap_err("Failed to save config")?;

    println!("Default model set to: {model}");
    println!("Config saved to: {}", Config::config_path().display());
    Ok(())
}

/// Clear the persisted default model.
pub fn config_clear_model() -> Result<()> {
    let mut cfg = Config::load();
    cfg.clear_default_model()
        .wrap_err("Failed to save config")?;

    println!("Default model cleared.");
    Ok(())
}

fn model_names(models: &[ModelSpec]) -> String {
    models
        .iter()
        .map(|m| m.name.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

fn format_contexts(contexts: &[Context]) -> String {
    if contexts.is_empty() {
        return "  (no contexts)\n".to_string();
    }

    contexts
        .iter()
        .enumerate()
        .map(|(i, c)| {
            let text = c.text.replace('\n', " ");
            format!("  {}. [{} | {:.2}] {}\n", i + 1, c.source, c.score, text)
        })
        .collect()
}

fn format_meta(meta: &GenerationMeta) -> String {
    format!(
        "[model: {} | style: {} | contexts: {} | tokens: {}]",
        meta.model, meta.style, meta.context_count, meta.tokens_estimate
    )
}

#[cfg(test)]
mod tests {
    use paimon_core::GenerationStyle;

    use super::*;

    #[test]
    fn test_build_pipeline_with_model_override() {
        let malphas = build_pipeline(&Config::default(), Some("gpt-analytic")).unwrap();
        assert_eq!(malphas.active_model().name, "gpt-analytic");
    }

    #[test]
    fn test_build_pipeline_rejects_unknown_model() {
        let err = build_pipeline(&Config::default(), Some("gpt-huge")).unwrap_err();
        assert!(err.to_string().contains("gpt-mini, gpt-balanced, gpt-analytic"));
        assert!(matches!(
            err.downcast_ref::<Error>(),
            Some(Error::ModelNotFound { model_id }) if model_id == "gpt-huge"
        ));
    }

    #[test]
    fn test_config_set_model_rejects_unknown_model() {
        let err = config_set_model("gpt-huge").unwrap_err();
        assert!(err.to_string().contains("Unknown model 'gpt-huge'"));
        assert!(matches!(
            err.downcast_ref::<Error>(),
            Some(Error::ModelNotFound { .. })
        ));
    }

    #[test]
    fn test_build_pipeline_rejects_bad_configured_model() {
        let cfg = Config {
            default_model: Some("gpt-huge".to_string()),
            ..Config::default()
        };
        assert!(build_pipeline(&cfg, None).is_err());
    }

    #[test]
    fn test_format_contexts() {
        let contexts = vec![
            Context::new("seed_faq_1", 0.5, "Q: one?\nA: two"),
            Context::new("manual", 0.0, "plain"),
        ];
        let out = format_contexts(&contexts);

        assert_eq!(
            out,
            "  1. [seed_faq_1 | 0.50] Q: one? A: two\n  2. [manual | 0.00] plain\n"
        );
        assert_eq!(format_contexts(&[]), "  (no contexts)\n");
    }

    #[test]
    fn test_format_meta() {
        let meta = GenerationMeta {
            model: "gpt-mini".to_string(),
            style: GenerationStyle::Concise,
            tokens_estimate: 7,
            context_count: 1,
        };
        assert_eq!(
            format_meta(&meta),
            "[model: gpt-mini | style: concise | contexts: 1 | tokens: 7]"
        );
    }

    #[tokio::test]
    async fn test_ask_runs() {
        ask(&Config::default(), "How to contact support?", Some(1), None, true)
            .await
            .unwrap();
    }

    #[test]
    fn test_search_runs() {
        search(&Config::default(), "reset password", Some(2), false).unwrap();
    }

    #[test]
    fn test_search_rejects_blank_query() {
        let err = search(&Config::default(), "  ", Some(2), false).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<Error>(),
            Some(Error::InvalidInput { .. })
        ));
    }
}
