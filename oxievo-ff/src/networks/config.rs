use super::{Topology, WeightLayout};

use serde::{Deserialize, Serialize};

/// Configuration data for network generation.
/// Every network built from the same configuration
/// has the same shape and the same flat weight layout.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkConfig {
    /// Neuron count of each layer.
    pub topology: Topology,
    /// Flat weight vector layout.
    #[serde(default)]
    pub layout: WeightLayout,
}

impl NetworkConfig {
    /// Returns a configuration with the [`Compat`] layout.
    ///
    /// [`Compat`]: WeightLayout::Compat
    ///
    /// # Examples
    /// ```
    /// use oxievo_ff::networks::{NetworkConfig, Topology, WeightLayout};
    ///
    /// let config = NetworkConfig::new(Topology::new(vec![2, 1]).unwrap());
    /// assert_eq!(config.layout, WeightLayout::Compat);
    ///
    /// let exact = NetworkConfig {
    ///     layout: WeightLayout::Exact,
    ///     ..config
    /// };
    /// ```
    pub fn new(topology: Topology) -> NetworkConfig {
        NetworkConfig {
            topology,
            layout: WeightLayout::Compat,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_defaults_when_omitted() {
        let config: NetworkConfig = serde_json::from_str(r#"{"topology":[1,2,1]}"#).unwrap();
        assert_eq!(config.topology.layers(), &[1, 2, 1]);
        assert_eq!(config.layout, WeightLayout::Compat);

        let config: NetworkConfig =
            serde_json::from_str(r#"{"topology":[2,1],"layout":"Exact"}"#).unwrap();
        assert_eq!(config.layout, WeightLayout::Exact);
    }

    #[test]
    fn invalid_topology_is_rejected() {
        assert!(serde_json::from_str::<NetworkConfig>(r#"{"topology":[1]}"#).is_err());
    }
}
