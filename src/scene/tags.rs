//! Closed tag vocabularies for scenes and trajectories.
//!
//! The wire names (`kNight`, `kMoveLeft`, ...) are the dataset's recorded
//! spelling and are preserved through serde renames; any value outside the
//! vocabularies fails to parse.

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
/// Scene-level metadata tags, one enumerated value per tag type.
pub struct SceneTags {
    /// Time-of-day bucket.
    pub day_time: DayTime,
    /// Season of the recording.
    pub season: Season,
    /// Recording location.
    pub track: TrackLocation,
    /// Sun phase during the recording.
    pub sun_phase: SunPhase,
    /// Precipitation during the recording.
    pub precipitation: Precipitation,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
/// Time-of-day bucket of a scene.
pub enum DayTime {
    /// Recorded at night.
    #[serde(rename = "kNight")]
    Night,
    /// Recorded in the morning.
    #[serde(rename = "kMorning")]
    Morning,
    /// Recorded in the afternoon.
    #[serde(rename = "kAfternoon")]
    Afternoon,
    /// Recorded in the evening.
    #[serde(rename = "kEvening")]
    Evening,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
/// Season of a scene recording.
pub enum Season {
    /// Winter recording.
    #[serde(rename = "kWinter")]
    Winter,
    /// Spring recording.
    #[serde(rename = "kSpring")]
    Spring,
    /// Summer recording.
    #[serde(rename = "kSummer")]
    Summer,
    /// Autumn recording.
    #[serde(rename = "kAutumn")]
    Autumn,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
/// Recording location of a scene.
pub enum TrackLocation {
    /// Moscow.
    Moscow,
    /// Skolkovo.
    Skolkovo,
    /// Innopolis.
    Innopolis,
    /// Ann Arbor.
    AnnArbor,
    /// Modiin.
    Modiin,
    /// Tel Aviv.
    TelAviv,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
/// Sun phase during a scene recording.
pub enum SunPhase {
    /// Astronomical night.
    #[serde(rename = "kAstronomicalNight")]
    AstronomicalNight,
    /// Twilight.
    #[serde(rename = "kTwilight")]
    Twilight,
    /// Daylight.
    #[serde(rename = "kDaylight")]
    Daylight,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
/// Precipitation during a scene recording.
pub enum Precipitation {
    /// No precipitation.
    #[serde(rename = "kNoPrecipitation")]
    NoPrecipitation,
    /// Rain.
    #[serde(rename = "kRain")]
    Rain,
    /// Sleet.
    #[serde(rename = "kSleet")]
    Sleet,
    /// Snow.
    #[serde(rename = "kSnow")]
    Snow,
}

#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
/// Semantic label describing an agent's future motion pattern.
pub enum TrajectoryTag {
    /// The agent turns or shifts left.
    #[serde(rename = "kMoveLeft")]
    MoveLeft,
    /// The agent turns or shifts right.
    #[serde(rename = "kMoveRight")]
    MoveRight,
    /// The agent keeps moving forward.
    #[serde(rename = "kMoveForward")]
    MoveForward,
    /// The agent moves backward.
    #[serde(rename = "kMoveBack")]
    MoveBack,
    /// The agent accelerates.
    #[serde(rename = "kAcceleration")]
    Acceleration,
    /// The agent decelerates.
    #[serde(rename = "kDeceleration")]
    Deceleration,
    /// The agent keeps a roughly constant speed.
    #[serde(rename = "kUniform")]
    Uniform,
    /// The agent comes to a stop.
    #[serde(rename = "kStopping")]
    Stopping,
    /// The agent starts from standstill.
    #[serde(rename = "kStarting")]
    Starting,
    /// The agent stays stationary.
    #[serde(rename = "kStationary")]
    Stationary,
}

#[cfg(test)]
#[path = "../../tests/unit/scene/tags.rs"]
mod tests;
