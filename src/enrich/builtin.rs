use anyhow::Context as _;
use std::sync::Arc;

use super::{Enricher, EnricherFactory};
use crate::notice::Notice;

/// Adds the host name to the notice context.
pub struct HostnameEnricher;

impl Enricher for HostnameEnricher {
    fn name(&self) -> &str {
        "hostname"
    }

    fn enhance(&self, notice: &mut Notice) -> anyhow::Result<()> {
        let host = hostname::get().context("Hostname lookup failed")?;
        notice
            .context
            .insert("hostname".to_string(), host.to_string_lossy().into_owned());
        Ok(())
    }
}

pub struct HostnameEnricherFactory;

impl EnricherFactory for HostnameEnricherFactory {
    fn create(&self) -> anyhow::Result<Arc<dyn Enricher>> {
        Ok(Arc::new(HostnameEnricher))
    }
}

/// Adds process identity (pid, executable name) to the notice context.
pub struct ProcessEnricher;

impl Enricher for ProcessEnricher {
    fn name(&self) -> &str {
        "process"
    }

    fn enhance(&self, notice: &mut Notice) -> anyhow::Result<()> {
        notice
            .context
            .insert("pid".to_string(), std::process::id().to_string());
        if let Ok(exe) = std::env::current_exe()
            && let Some(name) = exe.file_name()
        {
            notice
                .context
                .insert("executable".to_string(), name.to_string_lossy().into_owned());
        }
        Ok(())
    }
}

pub struct ProcessEnricherFactory;

impl EnricherFactory for ProcessEnricherFactory {
    fn create(&self) -> anyhow::Result<Arc<dyn Enricher>> {
        Ok(Arc::new(ProcessEnricher))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notice::NoticeBuilder;
    use chrono::Utc;

    #[test]
    fn test_hostname_enricher_adds_context() {
        let mut notice = NoticeBuilder::new("key", "test").from_message("m", None, Utc::now());

        HostnameEnricher.enhance(&mut notice).unwrap();

        let host = notice.context.get("hostname").expect("hostname key");
        assert!(!host.is_empty());
    }

    #[test]
    fn test_process_enricher_adds_pid() {
        let mut notice = NoticeBuilder::new("key", "test").from_message("m", None, Utc::now());

        ProcessEnricher.enhance(&mut notice).unwrap();

        let pid = notice.context.get("pid").expect("pid key");
        assert_eq!(pid.parse::<u32>().unwrap(), std::process::id());
    }
}
