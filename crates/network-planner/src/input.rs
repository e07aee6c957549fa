//! Input parameter loading from JSON

use crate::Result;
use cluster_interference::{ClusterConfig, SectorLayout};
use link_budget::{CityType, StationPair};
use network_sizing::{SizingConfig, SizingInputs};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use tracing::{debug, info};

/// Planning parameters, one flat JSON object
///
/// Key names follow the established input file format, spelling included.
/// Paired values are `[base_station, mobile_station]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InputRecord {
    // Spatial sizing
    pub land_area: f64,
    pub one_fq_ch_bandwith: f64,
    pub busy_hour_activity: f64,
    #[serde(alias = "conversation_ch_num_per_carrier")]
    pub conv_ch_per_carrier: u32,
    pub sector_radio_chan: u32,
    pub traffic_transmission_ch_num: u32,
    pub call_blocking_admissible_prob: f64,
    pub subscribers_total: u64,

    // Link budget
    pub building_penetraition_loses: f64,
    pub subscriber_body_loses: f64,
    pub location_coverage: f64,
    pub bandwidth: f64,
    pub power_to_noise_power_ratio: f64,
    pub receiver_noise_figure: f64,
    pub eqv_isotropically_radiated_pow: (f64, f64),
    pub useful_signal_strength: (f64, f64),
    pub transmitter_output_power: f64,
    pub transmitter_antenna_gain: f64,
    pub transmission_antenna_feeder_loss: f64,
    pub duplex_filter_loss: f64,
    pub diplexer_loss: f64,
    pub radiated_power_reduction_coefficient: f64,
    pub radio_frequency: f64,
    pub receiving_antenna_height: f64,
    pub transmitting_antenna_height: f64,
    pub distance_between_antennas: f64,
    pub city_type: u32,

    // Cluster
    pub cluster_dim: u32,
    pub tetta: f64,
    pub cell_sectors_num: u32,
    pub signal_to_noise_ratio: f64,
}

impl InputRecord {
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn sector_layout(&self) -> Result<SectorLayout> {
        Ok(SectorLayout::try_from(self.cell_sectors_num)?)
    }

    pub fn city(&self) -> Result<CityType> {
        Ok(CityType::try_from(self.city_type)?)
    }

    pub fn cluster_config(&self) -> Result<ClusterConfig> {
        Ok(ClusterConfig {
            cluster_dim: self.cluster_dim,
            tetta: self.tetta,
            layout: self.sector_layout()?,
            target_ratio_db: self.signal_to_noise_ratio,
        })
    }

    pub fn sizing_config(&self) -> SizingConfig {
        SizingConfig {
            sectors_per_cell: self.cell_sectors_num,
            radio_channels_per_sector: self.sector_radio_chan,
            cluster_dim: self.cluster_dim,
            traffic_channels: self.traffic_transmission_ch_num,
            blocking_probability: self.call_blocking_admissible_prob,
            subscribers_total: self.subscribers_total,
        }
    }

    pub fn sizing_inputs(&self) -> SizingInputs {
        SizingInputs {
            channel_bandwidth: self.one_fq_ch_bandwith,
            channels_per_carrier: self.conv_ch_per_carrier,
            busy_hour_activity: self.busy_hour_activity,
            land_area: self.land_area,
        }
    }

    pub fn eirp_pair(&self) -> StationPair {
        self.eqv_isotropically_radiated_pow.into()
    }

    pub fn sensitivity_pair(&self) -> StationPair {
        self.useful_signal_strength.into()
    }
}

/// Load the input record from a JSON file
pub fn load_input(path: impl AsRef<Path>) -> Result<InputRecord> {
    let path = path.as_ref();
    info!("Loading input parameters from {:?}", path);

    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let raw: serde_json::Value = serde_json::from_reader(reader)?;
    let keys = raw.as_object().map_or(0, |object| object.len());
    let record: InputRecord = serde_json::from_value(raw)?;

    info!("Loaded {} input parameters", keys);
    debug!(
        "Cluster K={} sectors={} city type={}",
        record.cluster_dim, record.cell_sectors_num, record.city_type
    );

    Ok(record)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::{ErrorKind, PlannerError};
    use std::io::Write;
    use tempfile::NamedTempFile;

    pub(crate) const SAMPLE: &str = r#"{
        "land_area": 1500.0,
        "one_fq_ch_bandwith": 0.2,
        "busy_hour_activity": 0.025,
        "conv_ch_per_carrier": 8,
        "building_penetraition_loses": 15.0,
        "subscriber_body_loses": 3.0,
        "location_coverage": 7.0,
        "bandwidth": 200000.0,
        "power_to_noise_power_ratio": 9.0,
        "receiver_noise_figure": 5.0,
        "eqv_isotropically_radiated_pow": [55.0, 30.0],
        "useful_signal_strength": [-104.0, -102.0],
        "transmitter_output_power": 43.0,
        "transmitter_antenna_gain": 18.0,
        "transmission_antenna_feeder_loss": -3.0,
        "duplex_filter_loss": -1.0,
        "diplexer_loss": -0.5,
        "radiated_power_reduction_coefficient": 0.0,
        "radio_frequency": 1800.0,
        "receiving_antenna_height": 1.5,
        "transmitting_antenna_height": 40.0,
        "distance_between_antennas": 5.0,
        "city_type": 2,
        "cluster_dim": 7,
        "tetta": 6.0,
        "cell_sectors_num": 3,
        "signal_to_noise_ratio": 9.0,
        "sector_radio_chan": 2,
        "traffic_transmission_ch_num": 14,
        "call_blocking_admissible_prob": 0.02,
        "subscribers_total": 600000
    }"#;

    pub(crate) fn sample() -> InputRecord {
        InputRecord::from_json_str(SAMPLE).unwrap()
    }

    /// Sample with one key replaced by a raw JSON value
    pub(crate) fn sample_with(key: &str, value: &str) -> InputRecord {
        let mut raw: serde_json::Value = serde_json::from_str(SAMPLE).unwrap();
        raw[key] = serde_json::from_str(value).unwrap();
        serde_json::from_value(raw).unwrap()
    }

    #[test]
    fn test_load_input() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();

        let record = load_input(file.path()).unwrap();
        assert_eq!(record.cluster_dim, 7);
        assert_eq!(record.eqv_isotropically_radiated_pow, (55.0, 30.0));
        assert_eq!(record.eirp_pair(), StationPair::new(55.0, 30.0));
        assert_eq!(record.sensitivity_pair().mobile_station, -102.0);
        assert_eq!(record.city().unwrap(), CityType::Medium);
        assert_eq!(record.sector_layout().unwrap(), SectorLayout::ThreeSector);
    }

    #[test]
    fn test_missing_file() {
        let err = load_input("/nonexistent/initial.json").unwrap_err();
        assert!(matches!(err, PlannerError::Io(_)));
        assert_eq!(err.kind(), ErrorKind::MissingOrMalformedInput);
    }

    #[test]
    fn test_missing_key() {
        let mut raw: serde_json::Value = serde_json::from_str(SAMPLE).unwrap();
        raw.as_object_mut().unwrap().remove("tetta");

        let err = InputRecord::from_json_str(&raw.to_string()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingOrMalformedInput);
        let source = std::error::Error::source(&err).unwrap().to_string();
        assert!(source.contains("tetta"), "{}", source);
    }

    #[test]
    fn test_wrong_pair_shape() {
        let mut raw: serde_json::Value = serde_json::from_str(SAMPLE).unwrap();
        raw["useful_signal_strength"] = serde_json::json!(-104.0);

        let err = InputRecord::from_json_str(&raw.to_string()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingOrMalformedInput);
    }

    #[test]
    fn test_legacy_key_alias() {
        let mut raw: serde_json::Value = serde_json::from_str(SAMPLE).unwrap();
        let object = raw.as_object_mut().unwrap();
        object.remove("conv_ch_per_carrier");
        object.insert("conversation_ch_num_per_carrier".into(), serde_json::json!(4));

        let record = InputRecord::from_json_str(&raw.to_string()).unwrap();
        assert_eq!(record.conv_ch_per_carrier, 4);
    }

    #[test]
    fn test_unknown_keys_ignored() {
        let record = sample_with("operator_name", "\"Example Telecom\"");
        assert_eq!(record, sample());
    }

    #[test]
    fn test_categorical_codes() {
        let err = sample_with("city_type", "5").city().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnsupportedConfiguration);

        let err = sample_with("cell_sectors_num", "2").cluster_config().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnsupportedConfiguration);
    }
}
