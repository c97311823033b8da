#[cfg(feature = "serde")]
use serde::{Deserialize as SerdeDeserialize, Serialize as SerdeSerialize};

/// Position inside the determiner system of a noun phrase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum DeterminerSlot {
    Pre,
    Central,
    Post,
    /// The plural/uncountable marker.
    Number,
}

impl DeterminerSlot {
    pub const ALL: [DeterminerSlot; 4] = [
        DeterminerSlot::Pre,
        DeterminerSlot::Central,
        DeterminerSlot::Post,
        DeterminerSlot::Number,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DeterminerSlot::Pre => "pre",
            DeterminerSlot::Central => "central",
            DeterminerSlot::Post => "post",
            DeterminerSlot::Number => "number",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|slot| slot.as_str() == s)
    }

    /// Precedence when two committed values conflict: the higher rank wins.
    pub fn rank(&self) -> u8 {
        match self {
            DeterminerSlot::Central => 3,
            DeterminerSlot::Pre => 2,
            DeterminerSlot::Post => 1,
            DeterminerSlot::Number => 0,
        }
    }
}

macro_rules! determiners {
    ($($variant:ident => ($text:expr, $slot:ident)),* $(,)?) => {
        /// Every value a determiner slot can hold.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
        #[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
        pub enum Determiner {
            $($variant),*
        }

        impl Determiner {
            pub const ALL: &'static [Determiner] = &[$(Determiner::$variant),*];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Determiner::$variant => $text),*
                }
            }

            pub fn slot(&self) -> DeterminerSlot {
                match self {
                    $(Determiner::$variant => DeterminerSlot::$slot),*
                }
            }
        }
    };
}

determiners! {
    All => ("all", Pre),
    Both => ("both", Pre),
    Half => ("half", Pre),

    The => ("the", Central),
    A => ("a", Central),
    This => ("this", Central),
    That => ("that", Central),
    These => ("these", Central),
    Those => ("those", Central),
    My => ("my", Central),
    Your => ("your", Central),
    His => ("his", Central),
    Her => ("her", Central),
    Its => ("its", Central),
    Our => ("our", Central),
    Their => ("their", Central),
    Every => ("every", Central),
    Each => ("each", Central),
    Any => ("any", Central),
    Some => ("some", Central),
    No => ("no", Central),
    Either => ("either", Central),
    Neither => ("neither", Central),

    One => ("one", Post),
    Two => ("two", Post),
    Three => ("three", Post),
    Many => ("many", Post),
    Few => ("few", Post),
    Several => ("several", Post),
    Much => ("much", Post),
    Little => ("little", Post),
    First => ("first", Post),
    Last => ("last", Post),
    Next => ("next", Post),

    Plural => ("plural", Number),
    Uncountable => ("uncountable", Number),
}

impl Determiner {
    pub fn parse(s: &str) -> Option<Self> {
        let s = if s == "an" { "a" } else { s };
        Self::ALL.iter().copied().find(|d| d.as_str() == s)
    }

    pub fn values(slot: DeterminerSlot) -> impl Iterator<Item = Determiner> {
        Self::ALL.iter().copied().filter(move |d| d.slot() == slot)
    }

    pub fn is_possessive(&self) -> bool {
        matches!(
            self,
            Determiner::My
                | Determiner::Your
                | Determiner::His
                | Determiner::Her
                | Determiner::Its
                | Determiner::Our
                | Determiner::Their
        )
    }

    /// Values that by themselves force a plural head noun.
    pub fn forces_plural(&self) -> bool {
        matches!(
            self,
            Determiner::Both
                | Determiner::These
                | Determiner::Those
                | Determiner::Two
                | Determiner::Three
                | Determiner::Many
                | Determiner::Few
                | Determiner::Several
                | Determiner::Plural
        )
    }
}

impl core::fmt::Display for Determiner {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Committed determiner selections of one noun phrase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DeterminerConfig {
    pub pre: Option<Determiner>,
    pub central: Option<Determiner>,
    pub post: Option<Determiner>,
    pub number: Option<Determiner>,
}

impl DeterminerConfig {
    pub fn get(&self, slot: DeterminerSlot) -> Option<Determiner> {
        match slot {
            DeterminerSlot::Pre => self.pre,
            DeterminerSlot::Central => self.central,
            DeterminerSlot::Post => self.post,
            DeterminerSlot::Number => self.number,
        }
    }

    /// Places `value` into its own slot, replacing what was there.
    pub fn with(mut self, value: Determiner) -> Self {
        self.set(value.slot(), Some(value));
        self
    }

    /// Low-level slot write. Values belonging to another slot are ignored.
    pub fn set(&mut self, slot: DeterminerSlot, value: Option<Determiner>) {
        if matches!(value, Some(v) if v.slot() != slot) {
            return;
        }
        match slot {
            DeterminerSlot::Pre => self.pre = value,
            DeterminerSlot::Central => self.central = value,
            DeterminerSlot::Post => self.post = value,
            DeterminerSlot::Number => self.number = value,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.iter().next().is_none()
    }

    /// Committed values in surface order (pre, central, post, marker).
    pub fn iter(&self) -> impl Iterator<Item = Determiner> + '_ {
        DeterminerSlot::ALL.into_iter().filter_map(|slot| self.get(slot))
    }

    pub fn requires_plural(&self) -> bool {
        self.iter().any(|d| d.forces_plural())
    }

    pub fn is_uncountable(&self) -> bool {
        self.number == Some(Determiner::Uncountable)
    }
}
