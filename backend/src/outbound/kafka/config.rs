//! Producer client settings and their translation to librdkafka properties.

use std::time::Duration;

use rdkafka::config::ClientConfig;

use super::KafkaConnectError;

/// Connection settings for the notification producer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KafkaSettings {
    /// Comma-separated bootstrap servers.
    pub brokers: String,
    /// Client identifier reported to the brokers.
    pub client_id: String,
    /// Required acknowledgements (`1`, `all`/`-1`, or a replica count).
    pub acks: String,
    /// Upper bound on the startup reachability check.
    pub connect_timeout: Duration,
}

impl KafkaSettings {
    /// Build the librdkafka client configuration for a producer.
    ///
    /// # Errors
    /// Returns [`KafkaConnectError::InvalidAcks`] when `acks` is `0` or not a
    /// recognised value: the publisher reports success only after the broker
    /// acknowledges, which `acks=0` never does.
    pub fn client_config(&self) -> Result<ClientConfig, KafkaConnectError> {
        let acks = normalise_acks(&self.acks)?;
        let mut client_config = ClientConfig::new();
        client_config
            .set("bootstrap.servers", &self.brokers)
            .set("client.id", &self.client_id)
            .set("acks", acks);
        Ok(client_config)
    }
}

fn normalise_acks(raw: &str) -> Result<String, KafkaConnectError> {
    let trimmed = raw.trim();
    if trimmed.eq_ignore_ascii_case("all") || trimmed == "-1" {
        return Ok("all".to_owned());
    }
    match trimmed.parse::<u16>() {
        Ok(count) if count > 0 => Ok(count.to_string()),
        _ => Err(KafkaConnectError::InvalidAcks {
            value: raw.to_owned(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn settings() -> KafkaSettings {
        KafkaSettings {
            brokers: "localhost:9092".to_owned(),
            client_id: "notification-producer".to_owned(),
            acks: "1".to_owned(),
            connect_timeout: Duration::from_secs(5),
        }
    }

    #[rstest]
    fn sets_bootstrap_servers_and_client_id(settings: KafkaSettings) {
        let config = settings.client_config().expect("valid settings");
        assert_eq!(config.get("bootstrap.servers"), Some("localhost:9092"));
        assert_eq!(config.get("client.id"), Some("notification-producer"));
        assert_eq!(config.get("acks"), Some("1"));
    }

    #[rstest]
    #[case("all", "all")]
    #[case("ALL", "all")]
    #[case("-1", "all")]
    #[case(" 2 ", "2")]
    fn accepts_acknowledging_modes(
        mut settings: KafkaSettings,
        #[case] raw: &str,
        #[case] expected: &str,
    ) {
        settings.acks = raw.to_owned();
        let config = settings.client_config().expect("valid acks");
        assert_eq!(config.get("acks"), Some(expected));
    }

    #[rstest]
    #[case("0")]
    #[case("none")]
    #[case("")]
    fn rejects_fire_and_forget_and_garbage(mut settings: KafkaSettings, #[case] raw: &str) {
        settings.acks = raw.to_owned();
        let err = settings.client_config().expect_err("invalid acks");
        assert!(matches!(err, KafkaConnectError::InvalidAcks { value } if value == raw));
    }
}
