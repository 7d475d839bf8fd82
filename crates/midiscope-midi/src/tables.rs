//! Static lookup tables: controller descriptors and system message names.

/// Named controller, optionally with discrete value labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControllerDescriptor {
    pub name: &'static str,
    /// When present, the value byte selects one of these labels instead of
    /// being shown as a number.
    pub values: Option<&'static [&'static str]>,
}

impl ControllerDescriptor {
    const fn named(name: &'static str) -> Self {
        Self { name, values: None }
    }

    const fn switch(name: &'static str) -> Self {
        Self {
            name,
            values: Some(&["Off", "On"]),
        }
    }

    /// Label selected by `value`, if this controller has discrete values.
    ///
    /// The 0-127 range is split into `values.len()` equal buckets.
    pub fn discrete_value(&self, value: u8) -> Option<&'static str> {
        let values = self.values.filter(|values| !values.is_empty())?;
        let bucket = (128 / values.len()).max(1);
        let ordinal = (value as usize / bucket).min(values.len() - 1);
        Some(values[ordinal])
    }
}

static BANK_SELECT: ControllerDescriptor = ControllerDescriptor::named("Bank Select");
static MODULATION_WHEEL: ControllerDescriptor = ControllerDescriptor::named("Modulation Wheel");
static BREATH_CONTROLLER: ControllerDescriptor = ControllerDescriptor::named("Breath Controller");
static FOOT_CONTROLLER: ControllerDescriptor = ControllerDescriptor::named("Foot Controller");
static PORTAMENTO_TIME: ControllerDescriptor = ControllerDescriptor::named("Portamento Time");
static DATA_ENTRY: ControllerDescriptor = ControllerDescriptor::named("Data Entry");
static CHANNEL_VOLUME: ControllerDescriptor = ControllerDescriptor::named("Channel Volume");
static BALANCE: ControllerDescriptor = ControllerDescriptor::named("Balance");
static PAN: ControllerDescriptor = ControllerDescriptor::named("Pan");
static EXPRESSION: ControllerDescriptor = ControllerDescriptor::named("Expression Controller");
static EFFECT_1: ControllerDescriptor = ControllerDescriptor::named("Effect Control 1");
static EFFECT_2: ControllerDescriptor = ControllerDescriptor::named("Effect Control 2");
static GENERAL_1: ControllerDescriptor =
    ControllerDescriptor::named("General Purpose Controller 1");
static GENERAL_2: ControllerDescriptor =
    ControllerDescriptor::named("General Purpose Controller 2");
static GENERAL_3: ControllerDescriptor =
    ControllerDescriptor::named("General Purpose Controller 3");
static GENERAL_4: ControllerDescriptor =
    ControllerDescriptor::named("General Purpose Controller 4");
static SUSTAIN: ControllerDescriptor = ControllerDescriptor::switch("Sustain");
static PORTAMENTO: ControllerDescriptor = ControllerDescriptor::switch("Portamento");
static SOSTENUTO: ControllerDescriptor = ControllerDescriptor::switch("Sostenuto");
static SOFT: ControllerDescriptor = ControllerDescriptor::switch("Soft");
static LEGATO: ControllerDescriptor = ControllerDescriptor::switch("Legato");
static ALL_SOUND_OFF: ControllerDescriptor = ControllerDescriptor::named("All Sound Off");
static RESET_ALL: ControllerDescriptor = ControllerDescriptor::named("Reset All Controllers");
static LOCAL_CONTROL: ControllerDescriptor = ControllerDescriptor::switch("Local Control");
static ALL_NOTES_OFF: ControllerDescriptor = ControllerDescriptor::named("All Notes Off");
static OMNI_OFF: ControllerDescriptor = ControllerDescriptor::named("Omni Mode Off");
static OMNI_ON: ControllerDescriptor = ControllerDescriptor::named("Omni Mode On");
static MONO_ON: ControllerDescriptor = ControllerDescriptor::named("Mono Mode On");
static POLY_ON: ControllerDescriptor = ControllerDescriptor::named("Poly Mode On");

/// Name used for controller numbers without a descriptor.
pub const UNDEFINED_CONTROLLER: &str = "Undefined";

/// Descriptor for a controller index, `None` when the index is unassigned.
pub fn controller(index: u8) -> Option<&'static ControllerDescriptor> {
    let descriptor = match index {
        0 => &BANK_SELECT,
        1 => &MODULATION_WHEEL,
        2 => &BREATH_CONTROLLER,
        4 => &FOOT_CONTROLLER,
        5 => &PORTAMENTO_TIME,
        6 => &DATA_ENTRY,
        7 => &CHANNEL_VOLUME,
        8 => &BALANCE,
        10 => &PAN,
        11 => &EXPRESSION,
        12 => &EFFECT_1,
        13 => &EFFECT_2,
        16 => &GENERAL_1,
        17 => &GENERAL_2,
        18 => &GENERAL_3,
        19 => &GENERAL_4,
        64 => &SUSTAIN,
        65 => &PORTAMENTO,
        66 => &SOSTENUTO,
        67 => &SOFT,
        68 => &LEGATO,
        120 => &ALL_SOUND_OFF,
        121 => &RESET_ALL,
        122 => &LOCAL_CONTROL,
        123 => &ALL_NOTES_OFF,
        124 => &OMNI_OFF,
        125 => &OMNI_ON,
        126 => &MONO_ON,
        127 => &POLY_ON,
        _ => return None,
    };
    Some(descriptor)
}

/// System message names, indexed by the low nibble of a `0xF0..=0xFF` status.
pub const SYSTEM_MESSAGE_NAMES: [&str; 16] = [
    "System Exclusive",
    "MIDI Time Code",
    "Song Position Pointer",
    "Song Select",
    "Undefined",
    "Undefined",
    "Tune Request",
    "EOX",
    "Timing Clock",
    "Undefined",
    "Sequence Start",
    "Sequence Resume",
    "Sequence Stop",
    "Undefined",
    "Active Sensing",
    "Reset",
];

/// Name for a system status byte; only the low nibble is used.
#[inline]
pub fn system_message_name(status: u8) -> &'static str {
    SYSTEM_MESSAGE_NAMES[(status & 0x0F) as usize]
}
