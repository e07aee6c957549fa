//! Report assembly
//!
//! Runs the three calculators in a fixed order (cluster, spatial sizing,
//! link budget) and merges their labelled values into one flat report.
//! The first failure aborts the whole report.

use crate::metrics::{Locale, Metric};
use crate::{InputRecord, PlannerConfig, PlannerError, Result};
use cluster_interference::ClusterAnalyzer;
use link_budget::{CityType, StationPair};
use network_sizing::NetworkSizer;
use serde::ser::{Serialize, SerializeMap, Serializer};

/// Values produced by one calculator, in report order
pub type SectionValues = Vec<(Metric, f64)>;

#[derive(Debug, Clone, PartialEq)]
pub struct ReportEntry {
    pub metric: Metric,
    pub label: &'static str,
    pub value: f64,
}

/// Ordered label → value mapping, serialized as a flat JSON object
#[derive(Debug, Clone, PartialEq)]
pub struct OutputReport {
    locale: Locale,
    entries: Vec<ReportEntry>,
}

impl OutputReport {
    pub fn new(locale: Locale) -> Self {
        Self {
            locale,
            entries: Vec::with_capacity(Metric::ALL.len()),
        }
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    /// Append one value; labels are write-once and values must be finite
    pub fn insert(&mut self, metric: Metric, value: f64) -> Result<()> {
        let label = metric.label(self.locale);
        if self.entries.iter().any(|e| e.label == label) {
            return Err(PlannerError::DuplicateLabel(label.to_string()));
        }
        if !value.is_finite() {
            return Err(PlannerError::NonFiniteMetric { metric, value });
        }

        self.entries.push(ReportEntry {
            metric,
            label,
            value,
        });
        Ok(())
    }

    pub fn merge(&mut self, section: SectionValues) -> Result<()> {
        for (metric, value) in section {
            self.insert(metric, value)?;
        }
        Ok(())
    }

    pub fn get(&self, metric: Metric) -> Option<f64> {
        self.entries.iter().find(|e| e.metric == metric).map(|e| e.value)
    }

    pub fn entries(&self) -> &[ReportEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for OutputReport {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for entry in &self.entries {
            map.serialize_entry(entry.label, &entry.value)?;
        }
        map.end()
    }
}

/// Builds the planning report from one input record
#[derive(Debug, Clone)]
pub struct ReportAssembler {
    input: InputRecord,
    config: PlannerConfig,
    city: CityType,
    cluster: ClusterAnalyzer,
    sizer: NetworkSizer,
}

impl ReportAssembler {
    /// Categorical inputs are resolved here, before any formula runs
    pub fn new(input: &InputRecord, config: PlannerConfig) -> Result<Self> {
        let cluster_config = input.cluster_config()?;
        let city = input.city()?;

        let cluster = ClusterAnalyzer::new(cluster_config)?
            .with_outage_method(config.outage_method)
            .with_quadrature(config.quadrature);
        let sizer = NetworkSizer::new(input.sizing_config())?;

        Ok(Self {
            input: *input,
            config,
            city,
            cluster,
            sizer,
        })
    }

    pub fn cluster_section(&self) -> Result<SectionValues> {
        let summary = self.cluster.evaluate()?;
        Ok(vec![
            (Metric::OutageProbability, summary.outage_probability_pct),
            (Metric::InterferenceDeviation, summary.deviation),
            (Metric::InterfererAttenuation, summary.geometry.q),
            (Metric::RelativeInterferenceLevel, summary.relative_level),
        ])
    }

    pub fn sizing_section(&self) -> Result<SectionValues> {
        let summary = self.sizer.evaluate(&self.input.sizing_inputs())?;
        Ok(vec![
            (Metric::MinimumBandwidth, summary.minimum_bandwidth),
            (Metric::TotalFrequencyChannels, summary.total_frequency_channels as f64),
            (Metric::SubscribersPerCell, summary.subscribers_per_cell),
            (Metric::SectorTelephoneLoad, summary.sector_telephone_load),
            (Metric::ConversationChannelsPerSector, summary.conversation_channels_per_sector),
            (Metric::TotalBaseStations, summary.total_base_stations),
            (Metric::CoverageRadius, summary.coverage_radius),
        ])
    }

    pub fn link_budget_section(&self) -> Result<SectionValues> {
        let i = &self.input;

        let margin = link_budget::line_loss_margin(
            i.building_penetraition_loses,
            i.subscriber_body_loses,
            i.location_coverage,
        );
        let losses = link_budget::total_losses(
            i.eirp_pair(),
            i.sensitivity_pair(),
            StationPair::symmetric(margin),
        );
        let eirp = link_budget::eirp(
            i.transmitter_output_power,
            i.transmitter_antenna_gain,
            i.transmission_antenna_feeder_loss,
            i.duplex_filter_loss,
            i.diplexer_loss,
            i.radiated_power_reduction_coefficient,
        );
        let sensitivity = link_budget::receiver_sensitivity(
            i.bandwidth,
            i.power_to_noise_power_ratio,
            i.receiver_noise_figure,
        )?;
        let required = link_budget::required_signal_power(
            sensitivity,
            i.transmitter_antenna_gain,
            i.transmission_antenna_feeder_loss,
            i.diplexer_loss,
        );
        let correction = link_budget::antenna_height_correction(
            i.radio_frequency,
            i.receiving_antenna_height,
            self.city,
        )?;
        let path_loss = link_budget::cost231_hata(
            correction,
            i.radio_frequency,
            i.transmitting_antenna_height,
            i.distance_between_antennas,
            self.city,
        )?;

        Ok(vec![
            (Metric::LineLossMargin, margin),
            (Metric::DownlinkLosses, losses.downlink),
            (Metric::UplinkLosses, losses.uplink),
            (Metric::Eirp, eirp),
            (Metric::ReceiverSensitivity, sensitivity),
            (Metric::RequiredSignalPower, required),
            (Metric::AntennaHeightCorrection, correction),
            (Metric::PathLoss, path_loss),
        ])
    }

    pub fn build(&self) -> Result<OutputReport> {
        let mut report = OutputReport::new(self.config.locale);
        report.merge(self.cluster_section()?)?;
        report.merge(self.sizing_section()?)?;
        report.merge(self.link_budget_section()?)?;
        Ok(report)
    }
}

/// Validate, compute and assemble in one call
pub fn plan(input: &InputRecord, config: PlannerConfig) -> Result<OutputReport> {
    ReportAssembler::new(input, config)?.build()
}
