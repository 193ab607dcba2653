//! Numbers and names from the FIT profile.

use zerocopy::TryFromBytes;

/// Field number of the timestamp carried by any message.
pub const TIMESTAMP: u8 = 253;

/// Seconds from the Unix epoch to the FIT epoch, 1989-12-31T00:00:00Z.
pub const FIT_EPOCH: i64 = 631_065_600;

/// Global message numbers.
pub mod message {
    pub const FILE_ID: u16 = 0;
    pub const SESSION: u16 = 18;
    pub const LAP: u16 = 19;
    pub const RECORD: u16 = 20;
}

#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, TryFromBytes)]
pub enum Sport {
    Generic = 0,
    Running = 1,
    Cycling = 2,
    Transition = 3,
    FitnessEquipment = 4,
    Swimming = 5,
    Basketball = 6,
    Soccer = 7,
    Tennis = 8,
    AmericanFootball = 9,
    Training = 10,
    Walking = 11,
    CrossCountrySkiing = 12,
    AlpineSkiing = 13,
    Snowboarding = 14,
    Rowing = 15,
    Mountaineering = 16,
    Hiking = 17,
    Multisport = 18,
    Paddling = 19,
    Flying = 20,
    EBiking = 21,
    Motorcycling = 22,
    Boating = 23,
    Driving = 24,
    Golf = 25,
    HangGliding = 26,
    HorsebackRiding = 27,
    Hunting = 28,
    Fishing = 29,
    InlineSkating = 30,
    RockClimbing = 31,
    Sailing = 32,
    IceSkating = 33,
    SkyDiving = 34,
    Snowshoeing = 35,
    Snowmobiling = 36,
    StandUpPaddleboarding = 37,
    Surfing = 38,
    Wakeboarding = 39,
    WaterSkiing = 40,
    Kayaking = 41,
    Rafting = 42,
    Windsurfing = 43,
    Kitesurfing = 44,
    Tactical = 45,
    Jumpmaster = 46,
    Boxing = 47,
    FloorClimbing = 48,
    Diving = 53,
    All = 254,
}

#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, TryFromBytes)]
pub enum SubSport {
    Generic = 0,
    Treadmill = 1,
    Street = 2,
    Trail = 3,
    Track = 4,
    Spin = 5,
    IndoorCycling = 6,
    Road = 7,
    Mountain = 8,
    Downhill = 9,
    Recumbent = 10,
    Cyclocross = 11,
    HandCycling = 12,
    TrackCycling = 13,
    IndoorRowing = 14,
    Elliptical = 15,
    StairClimbing = 16,
    LapSwimming = 17,
    OpenWater = 18,
    FlexibilityTraining = 19,
    StrengthTraining = 20,
    WarmUp = 21,
    Match = 22,
    Exercise = 23,
    Challenge = 24,
    IndoorSkiing = 25,
    CardioTraining = 26,
    IndoorWalking = 27,
    EBikeFitness = 28,
    Bmx = 29,
    CasualWalking = 30,
    SpeedWalking = 31,
    BikeToRunTransition = 32,
    RunToBikeTransition = 33,
    SwimToBikeTransition = 34,
    Atv = 35,
    Motocross = 36,
    Backcountry = 37,
    Resort = 38,
    RcDrone = 39,
    Wingsuit = 40,
    Whitewater = 41,
    SkateSkiing = 42,
    Yoga = 43,
    Pilates = 44,
    IndoorRunning = 45,
    GravelCycling = 46,
    EBikeMountain = 47,
    Commuting = 48,
    MixedSurface = 49,
    Navigate = 50,
    TrackMe = 51,
    Map = 52,
    VirtualActivity = 58,
    Obstacle = 59,
    All = 254,
}

#[repr(u16)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, TryFromBytes)]
pub enum Manufacturer {
    Garmin = 1,
    DynastreamOem = 13,
    Dynastream = 15,
    Suunto = 23,
    WahooFitness = 32,
    Concept2 = 40,
    Specialized = 63,
    StagesCycling = 69,
    Sigmasport = 70,
    TomTom = 71,
    Wattbike = 73,
    Moxy = 76,
    Tacx = 89,
    Stryd = 95,
    Polar = 123,
    Development = 255,
    Zwift = 260,
    FaveroElectronics = 263,
    Strava = 265,
    Bryton = 267,
    TheSufferfest = 282,
    Hammerhead = 289,
    Coros = 294,
}

impl Sport {
    pub fn from_raw(raw: u8) -> Option<Self> {
        zerocopy::try_transmute!(raw).ok()
    }
}

impl SubSport {
    pub fn from_raw(raw: u8) -> Option<Self> {
        zerocopy::try_transmute!(raw).ok()
    }
}

impl Manufacturer {
    pub fn from_raw(raw: u16) -> Option<Self> {
        zerocopy::try_transmute!(raw).ok()
    }
}

/// Display name of a sport. A missing value reads as generic; values outside
/// the known profile keep their number.
pub fn sport_name(raw: Option<u8>) -> String {
    match raw.map(|raw| (raw, Sport::from_raw(raw))) {
        None => format!("{:?}", Sport::Generic),
        Some((_, Some(sport))) => format!("{sport:?}"),
        Some((raw, None)) => format!("Sport({raw})"),
    }
}

/// Display name of a sub-sport, following [`sport_name`].
pub fn sub_sport_name(raw: Option<u8>) -> String {
    match raw.map(|raw| (raw, SubSport::from_raw(raw))) {
        None => format!("{:?}", SubSport::Generic),
        Some((_, Some(sub_sport))) => format!("{sub_sport:?}"),
        Some((raw, None)) => format!("SubSport({raw})"),
    }
}

/// Display name of a device manufacturer.
pub fn manufacturer_name(raw: u16) -> String {
    match Manufacturer::from_raw(raw) {
        Some(manufacturer) => format!("{manufacturer:?}"),
        None => format!("Manufacturer({raw})"),
    }
}
