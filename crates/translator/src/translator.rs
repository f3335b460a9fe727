use crate::config::TranslatorConfig;
use crate::error::Result;
use crate::formatter::InvokeFormatter;
use crate::parser::AttentionParser;
use crate::types::Attention;

/// Web UI → InvokeAI prompt translator
#[derive(Debug, Clone, Default)]
pub struct Translator {
    config: TranslatorConfig,
    parser: AttentionParser,
    formatter: InvokeFormatter,
}

impl Translator {
    /// Create a translator, rejecting configs that cannot produce sane weights
    pub fn new(config: TranslatorConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            parser: AttentionParser::new(&config),
            formatter: InvokeFormatter::new(&config),
            config,
        })
    }

    #[must_use]
    pub fn config(&self) -> &TranslatorConfig {
        &self.config
    }

    /// Resolve a prompt into weighted segments
    pub fn parse(&self, prompt: &str) -> Attention {
        self.parser.parse(prompt)
    }

    /// Render weighted segments in InvokeAI syntax
    #[must_use]
    pub fn format(&self, attention: &Attention) -> String {
        self.formatter.format(attention)
    }

    /// Translate a prompt. Total: malformed markup degrades to literal text.
    pub fn translate(&self, prompt: &str) -> String {
        let attention = self.parse(prompt);
        log::trace!("Prompt resolved into {} segment(s)", attention.len());
        self.format(&attention)
    }
}

/// Translate a prompt with the default configuration
pub fn translate(prompt: &str) -> String {
    Translator::default().translate(prompt)
}
