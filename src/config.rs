use std::path::PathBuf;
use std::time::Duration;

/// Scrape configuration. The defaults are the TBCA production endpoints and
/// output filename; the struct exists so the orchestrator never reaches for
/// globals and tests can point everything elsewhere.
#[derive(Debug, Clone)]
pub struct Config {
    /// Paginated index of all foods (`?pagina=N`, 1-indexed).
    pub listing_url: String,
    /// Per-item detail page (`?cod_produto=<code>`).
    pub detail_url: String,
    pub output_path: PathBuf,
    pub request_timeout: Duration,
    /// Cooldown after every request, success or failure.
    pub politeness_delay: Duration,
    /// Full checkpoint write after this many successful items.
    pub checkpoint_every: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listing_url: "http://www.tbca.net.br/base-dados/composicao_alimentos.php".to_string(),
            detail_url: "http://www.tbca.net.br/base-dados/int_composicao_alimentos.php"
                .to_string(),
            output_path: PathBuf::from("tbca_dados_completos.json"),
            request_timeout: Duration::from_secs(30),
            politeness_delay: Duration::from_millis(500),
            checkpoint_every: 20,
        }
    }
}
