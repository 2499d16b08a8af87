use crate::{
    component::{Anomaly, AnomalySink},
    property::Property,
};

/// The properties between a `BEGIN:VEVENT` and its `END:VEVENT`, in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Event {
    pub properties: Vec<Property>,
}

impl Event {
    pub fn new(properties: Vec<Property>) -> Self {
        Self { properties }
    }

    #[inline]
    pub fn get_properties(&self) -> &[Property] {
        &self.properties
    }

    #[inline]
    pub fn add_property(&mut self, property: Property) {
        self.properties.push(property);
    }

    /// All `key` properties, with or without parameters.
    pub fn properties_matching<'e, 'k>(
        &'e self,
        key: &'k str,
    ) -> impl Iterator<Item = &'e Property> + 'k
    where
        'e: 'k,
    {
        self.properties.iter().filter(move |p| p.is_named(key))
    }

    /// The first `key` property. More than one is recorded as an anomaly.
    pub fn single_property<S: AnomalySink>(&self, key: &str, sink: &mut S) -> Option<&Property> {
        let mut props = self.properties_matching(key);
        let first = props.next()?;
        if props.next().is_some() {
            sink.record(Anomaly::MultipleProperties {
                key: key.to_owned(),
            });
        }
        Some(first)
    }
}
