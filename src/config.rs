//! Application configuration from YAML, secrets from the environment

use crate::backend::GeminiConfig;
use crate::core::Profile;
use crate::transport::SmtpConfig;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Top-level configuration loaded from the profile YAML file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Address emails are sent from (also the SMTP username)
    pub sender: String,

    /// Plain-text resume used as the pipeline's reference document
    pub resume: PathBuf,

    /// File attached to outgoing emails; defaults to the resume
    #[serde(default)]
    pub attachment: Option<PathBuf>,

    /// Directory finished emails are written to
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// Subject template; `{{ company }}` is substituted per target
    #[serde(default = "default_subject")]
    pub subject: String,

    /// Position the applications are for
    #[serde(default = "default_position")]
    pub position: String,

    /// Contact details the auditor appends beneath the email body
    pub contact: ContactInfo,

    #[serde(default)]
    pub smtp: SmtpSettings,

    #[serde(default)]
    pub backend: BackendSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactInfo {
    pub name: String,

    #[serde(default)]
    pub phone: Option<String>,

    #[serde(default)]
    pub linkedin: Option<String>,

    #[serde(default)]
    pub github: Option<String>,
}

impl ContactInfo {
    /// Render the block the terminal stage appends beneath the email body.
    pub fn render(&self) -> String {
        let mut lines = vec![format!("Name: {}", self.name)];
        if let Some(phone) = &self.phone {
            lines.push(format!("Mobile: {phone}"));
        }
        if let Some(linkedin) = &self.linkedin {
            lines.push(format!("LinkedIn: {linkedin}"));
        }
        if let Some(github) = &self.github {
            lines.push(format!("GitHub: {github}"));
        }
        lines.join("\n")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SmtpSettings {
    #[serde(default = "default_smtp_host")]
    pub host: String,

    #[serde(default = "default_smtp_port")]
    pub port: u16,
}

impl Default for SmtpSettings {
    fn default() -> Self {
        Self {
            host: default_smtp_host(),
            port: default_smtp_port(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendSettings {
    #[serde(default = "default_model")]
    pub model: String,

    #[serde(default = "default_temperature")]
    pub temperature: f32,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for BackendSettings {
    fn default() -> Self {
        Self {
            model: default_model(),
            temperature: default_temperature(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("generated_emails")
}

fn default_subject() -> String {
    "Application for an Intern Role at {{ company }}".to_string()
}

fn default_position() -> String {
    "AI/ML internship".to_string()
}

fn default_smtp_host() -> String {
    "smtp.gmail.com".to_string()
}

fn default_smtp_port() -> u16 {
    587
}

fn default_model() -> String {
    "gemini-2.0-flash".to_string()
}

fn default_temperature() -> f32 {
    0.7
}

fn default_timeout_secs() -> u64 {
    120
}

impl AppConfig {
    /// Load configuration from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).with_context(|| {
            format!("Failed to read config file {}", path.as_ref().display())
        })?;
        Self::from_yaml(&content)
    }

    /// Parse configuration from a YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: AppConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if !self.sender.contains('@') {
            anyhow::bail!("sender must be an email address, got '{}'", self.sender);
        }
        if self.contact.name.trim().is_empty() {
            anyhow::bail!("contact.name must not be empty");
        }
        if self
            .resume
            .extension()
            .and_then(|ext| ext.to_str())
            .map_or(true, |ext| !ext.eq_ignore_ascii_case("txt"))
        {
            anyhow::bail!(
                "resume must be a plain-text .txt file, got {}",
                self.resume.display()
            );
        }
        Ok(())
    }

    /// The file attached to outgoing emails.
    pub fn attachment_path(&self) -> &Path {
        self.attachment.as_deref().unwrap_or(&self.resume)
    }

    pub fn profile(&self) -> Profile {
        Profile {
            position: self.position.clone(),
            contact_block: self.contact.render(),
        }
    }

    pub fn smtp_config(&self) -> SmtpConfig {
        SmtpConfig {
            host: self.smtp.host.clone(),
            port: self.smtp.port,
            from_address: self.sender.clone(),
        }
    }

    pub fn gemini_config(&self) -> GeminiConfig {
        GeminiConfig::new()
            .with_model(self.backend.model.clone())
            .with_temperature(self.backend.temperature)
            .with_timeout(self.backend.timeout_secs)
    }
}

/// Credentials read from the environment once at startup, passed to the
/// adapter constructors; nothing reads the environment mid-pipeline.
#[derive(Clone)]
pub struct Secrets {
    pub gemini_api_key: String,
    pub serper_api_key: Option<String>,
    pub smtp_password: Option<String>,
}

impl Secrets {
    pub fn from_env() -> Result<Self> {
        let gemini_api_key =
            std::env::var("GEMINI_API_KEY").context("GEMINI_API_KEY is not set")?;
        let serper_api_key = std::env::var("SERPER_API_KEY").ok();
        let smtp_password = std::env::var("SMTP_PASSWORD").ok();

        Ok(Self {
            gemini_api_key,
            serper_api_key,
            smtp_password,
        })
    }
}

impl std::fmt::Debug for Secrets {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Secrets")
            .field("gemini_api_key", &"<redacted>")
            .field("serper_api_key", &self.serper_api_key.as_ref().map(|_| "<redacted>"))
            .field("smtp_password", &self.smtp_password.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL: &str = r#"
sender: "applicant@example.com"
resume: "resume.txt"
contact:
  name: "Test Applicant"
"#;

    #[test]
    fn test_minimal_config_gets_defaults() {
        let config = AppConfig::from_yaml(MINIMAL).unwrap();
        assert_eq!(config.output_dir, PathBuf::from("generated_emails"));
        assert_eq!(config.smtp.host, "smtp.gmail.com");
        assert_eq!(config.smtp.port, 587);
        assert_eq!(config.backend.model, "gemini-2.0-flash");
        assert!(config.subject.contains("{{ company }}"));
    }

    #[test]
    fn test_attachment_defaults_to_resume() {
        let config = AppConfig::from_yaml(MINIMAL).unwrap();
        assert_eq!(config.attachment_path(), Path::new("resume.txt"));
    }

    #[test]
    fn test_explicit_attachment_wins() {
        let yaml = format!("{MINIMAL}attachment: \"resume.pdf\"\n");
        let config = AppConfig::from_yaml(&yaml).unwrap();
        assert_eq!(config.attachment_path(), Path::new("resume.pdf"));
    }

    #[test]
    fn test_invalid_sender_rejected() {
        let yaml = MINIMAL.replace("applicant@example.com", "not-an-address");
        assert!(AppConfig::from_yaml(&yaml).is_err());
    }

    #[test]
    fn test_non_txt_resume_rejected() {
        let yaml = MINIMAL.replace("resume.txt", "resume.pdf");
        assert!(AppConfig::from_yaml(&yaml).is_err());
    }

    #[test]
    fn test_contact_block_rendering() {
        let contact = ContactInfo {
            name: "Test Applicant".to_string(),
            phone: None,
            linkedin: Some("https://linkedin.example/in/test".to_string()),
            github: Some("https://github.com/test".to_string()),
        };
        let block = contact.render();
        assert!(block.starts_with("Name: Test Applicant"));
        assert!(block.contains("LinkedIn: https://linkedin.example/in/test"));
        assert!(!block.contains("Mobile"));
    }

    #[test]
    fn test_secrets_debug_redacts() {
        let secrets = Secrets {
            gemini_api_key: "g-key".to_string(),
            serper_api_key: Some("s-key".to_string()),
            smtp_password: None,
        };
        let debug = format!("{secrets:?}");
        assert!(!debug.contains("g-key"));
        assert!(!debug.contains("s-key"));
    }
}
