//! Report metrics and their labels

use serde::{Deserialize, Serialize};
use std::fmt;

/// Language of report labels
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, clap::ValueEnum, Serialize, Deserialize)]
pub enum Locale {
    #[default]
    En,
    Ru,
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Locale::En => write!(f, "en"),
            Locale::Ru => write!(f, "ru"),
        }
    }
}

/// Calculator that produces a metric
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Section {
    Cluster,
    Sizing,
    LinkBudget,
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Section::Cluster => write!(f, "Cluster interference"),
            Section::Sizing => write!(f, "Spatial sizing"),
            Section::LinkBudget => write!(f, "Link budget"),
        }
    }
}

/// Every value the planning report can carry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Metric {
    // Cluster
    OutageProbability,
    InterferenceDeviation,
    InterfererAttenuation,
    RelativeInterferenceLevel,
    // Spatial sizing
    MinimumBandwidth,
    TotalFrequencyChannels,
    SubscribersPerCell,
    SectorTelephoneLoad,
    ConversationChannelsPerSector,
    TotalBaseStations,
    CoverageRadius,
    // Link budget
    LineLossMargin,
    DownlinkLosses,
    UplinkLosses,
    Eirp,
    ReceiverSensitivity,
    RequiredSignalPower,
    AntennaHeightCorrection,
    PathLoss,
}

impl Metric {
    /// Report order
    pub const ALL: [Metric; 19] = [
        Metric::OutageProbability,
        Metric::InterferenceDeviation,
        Metric::InterfererAttenuation,
        Metric::RelativeInterferenceLevel,
        Metric::MinimumBandwidth,
        Metric::TotalFrequencyChannels,
        Metric::SubscribersPerCell,
        Metric::SectorTelephoneLoad,
        Metric::ConversationChannelsPerSector,
        Metric::TotalBaseStations,
        Metric::CoverageRadius,
        Metric::LineLossMargin,
        Metric::DownlinkLosses,
        Metric::UplinkLosses,
        Metric::Eirp,
        Metric::ReceiverSensitivity,
        Metric::RequiredSignalPower,
        Metric::AntennaHeightCorrection,
        Metric::PathLoss,
    ];

    pub fn section(&self) -> Section {
        match self {
            Metric::OutageProbability
            | Metric::InterferenceDeviation
            | Metric::InterfererAttenuation
            | Metric::RelativeInterferenceLevel => Section::Cluster,
            Metric::MinimumBandwidth
            | Metric::TotalFrequencyChannels
            | Metric::SubscribersPerCell
            | Metric::SectorTelephoneLoad
            | Metric::ConversationChannelsPerSector
            | Metric::TotalBaseStations
            | Metric::CoverageRadius => Section::Sizing,
            Metric::LineLossMargin
            | Metric::DownlinkLosses
            | Metric::UplinkLosses
            | Metric::Eirp
            | Metric::ReceiverSensitivity
            | Metric::RequiredSignalPower
            | Metric::AntennaHeightCorrection
            | Metric::PathLoss => Section::LinkBudget,
        }
    }

    pub fn label(&self, locale: Locale) -> &'static str {
        match locale {
            Locale::En => self.english(),
            Locale::Ru => self.russian(),
        }
    }

    fn english(&self) -> &'static str {
        match self {
            Metric::OutageProbability => "Probability of not meeting the signal-to-interference requirement, %",
            Metric::InterferenceDeviation => "Deviation of the total interference level on the main reception channel",
            Metric::InterfererAttenuation => "Attenuation of interfering signals",
            Metric::RelativeInterferenceLevel => "Relative total interference level on the main reception channel",
            Metric::MinimumBandwidth => "Minimum bandwidth required to deploy the network",
            Metric::TotalFrequencyChannels => "Total number of frequency channels allocated to the network",
            Metric::SubscribersPerCell => "Number of subscribers per cell",
            Metric::SectorTelephoneLoad => "Telephone load per cell sector, Erl",
            Metric::ConversationChannelsPerSector => "Total number of conversation channels per sector",
            Metric::TotalBaseStations => "Total number of base stations",
            Metric::CoverageRadius => "Coverage radius of one base station",
            Metric::LineLossMargin => "Line loss margin, dB",
            Metric::DownlinkLosses => "Total radio signal losses from base station to mobile station, dB",
            Metric::UplinkLosses => "Total radio signal losses from mobile station to base station, dB",
            Metric::Eirp => "Equivalent isotropically radiated power (EIRP), dBm",
            Metric::ReceiverSensitivity => "Receiver sensitivity, dBm",
            Metric::RequiredSignalPower => "Required useful signal power for reception at 50% of locations, dBm",
            Metric::AntennaHeightCorrection => "Mobile antenna height correction factor for the terrain type, dB",
            Metric::PathLoss => "Signal loss from base station to mobile station (COST231-Hata), dB",
        }
    }

    fn russian(&self) -> &'static str {
        match self {
            Metric::OutageProbability => "Вероятность невыполнения требований по отношению сигнал/помеха, %",
            Metric::InterferenceDeviation => "Отклонение величины уровня суммарной помехи по основному каналу приема",
            Metric::InterfererAttenuation => "Ослабление мешающих сигналов",
            Metric::RelativeInterferenceLevel => "Относительный уровень суммарной помехи по основному каналу приема",
            Metric::MinimumBandwidth => "Минимальная полоса частот, необходимая для развертывания сети",
            Metric::TotalFrequencyChannels => "Общее число частотных каналов, выделяемых для развертывания сети",
            Metric::SubscribersPerCell => "Количество абонентов в одной ячейке",
            Metric::SectorTelephoneLoad => "Телефонная нагрузка на один сектор соты, Эрл",
            Metric::ConversationChannelsPerSector => "Общее число разговорных каналов в одном секторе",
            Metric::TotalBaseStations => "Общее число базовых станций",
            Metric::CoverageRadius => "Радиус зоны покрытия одной базовой станции",
            Metric::LineLossMargin => "Запас по потерям в линии, дБ",
            Metric::DownlinkLosses => "Суммарные потери радиосигнала от базовой станции к абонентской станции, дБ",
            Metric::UplinkLosses => "Суммарные потери радиосигнала от абонентской станции к базовой станции, дБ",
            Metric::Eirp => "Эквивалентная изотропно излучаемая мощность (ЭИИМ), дБм",
            Metric::ReceiverSensitivity => "Чувствительность приемника, дБм",
            Metric::RequiredSignalPower => "Необходимая мощность полезного сигнала для приема в 50% местоположений, дБм",
            Metric::AntennaHeightCorrection => "Поправочный коэффициент для высоты антенны подвижного объекта, дБ",
            Metric::PathLoss => "Потери сигнала от базовой станции до абонентской станции (COST231-Хата), дБ",
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.english())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_labels_unique_per_locale() {
        for locale in [Locale::En, Locale::Ru] {
            let labels: HashSet<_> = Metric::ALL.iter().map(|m| m.label(locale)).collect();
            assert_eq!(labels.len(), Metric::ALL.len(), "duplicate label in {}", locale);
        }
    }

    #[test]
    fn test_sections_are_contiguous() {
        let sections: Vec<Section> = Metric::ALL.iter().map(Metric::section).collect();
        let cluster = sections.iter().filter(|s| **s == Section::Cluster).count();
        let sizing = sections.iter().filter(|s| **s == Section::Sizing).count();
        assert_eq!((cluster, sizing, sections.len() - cluster - sizing), (4, 7, 8));

        let rank = |s: Section| match s {
            Section::Cluster => 0,
            Section::Sizing => 1,
            Section::LinkBudget => 2,
        };
        assert!(sections.windows(2).all(|w| rank(w[0]) <= rank(w[1])));
    }

    #[test]
    fn test_section_headings() {
        assert_eq!(Metric::OutageProbability.section().to_string(), "Cluster interference");
        assert_eq!(Metric::CoverageRadius.section().to_string(), "Spatial sizing");
        assert_eq!(Metric::PathLoss.section().to_string(), "Link budget");
    }

    #[test]
    fn test_display_is_english_label() {
        assert_eq!(Metric::Eirp.to_string(), Metric::Eirp.label(Locale::En));
    }
}
