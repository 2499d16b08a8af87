use derive_more::Display;

/// Something off about a document that parsing recovers from.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum Anomaly {
    #[display("event began without a preceding end, discarding the open event")]
    BeginWithoutEnd,
    #[display("event end without an open event")]
    EndWithoutBegin,
    #[display("property {key} outside of an event")]
    PropertyOutsideEvent { key: String, value: String },
    #[display("multiple {key} properties where one was expected, using the first")]
    MultipleProperties { key: String },
}

/// Where parsing reports [`Anomaly`]s.
pub trait AnomalySink {
    fn record(&mut self, anomaly: Anomaly);
}

impl AnomalySink for Vec<Anomaly> {
    #[inline]
    fn record(&mut self, anomaly: Anomaly) {
        self.push(anomaly);
    }
}

impl<S: AnomalySink + ?Sized> AnomalySink for &mut S {
    #[inline]
    fn record(&mut self, anomaly: Anomaly) {
        (**self).record(anomaly);
    }
}

/// Emits every anomaly as a `tracing` warning.
#[derive(Debug, Clone, Default)]
pub struct WarnLog {
    /// Document the anomalies belong to, added to every event.
    pub source: String,
}

impl WarnLog {
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
        }
    }
}

impl AnomalySink for WarnLog {
    fn record(&mut self, anomaly: Anomaly) {
        match &anomaly {
            Anomaly::PropertyOutsideEvent { key, value } => {
                tracing::warn!(source = %self.source, key = %key, value = %value, "{anomaly}")
            }
            Anomaly::MultipleProperties { key } => {
                tracing::warn!(source = %self.source, key = %key, "{anomaly}")
            }
            Anomaly::BeginWithoutEnd | Anomaly::EndWithoutBegin => {
                tracing::warn!(source = %self.source, "{anomaly}")
            }
        }
    }
}
