use serde::{Deserialize, Serialize};

macro_rules! us_states {
    ($($code:ident => $name:literal),+ $(,)?) => {
        /// A US state (or the District of Columbia), identified by its postal code.
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        pub enum UsState {
            $($code),+
        }

        impl UsState {
            pub const ALL: &'static [UsState] = &[$(UsState::$code),+];

            /// Two-letter postal code.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$code => stringify!($code)),+
                }
            }

            pub fn name(&self) -> &'static str {
                match self {
                    $(Self::$code => $name),+
                }
            }
        }
    };
}

us_states! {
    AL => "Alabama",
    AK => "Alaska",
    AZ => "Arizona",
    AR => "Arkansas",
    CA => "California",
    CO => "Colorado",
    CT => "Connecticut",
    DE => "Delaware",
    DC => "District of Columbia",
    FL => "Florida",
    GA => "Georgia",
    HI => "Hawaii",
    ID => "Idaho",
    IL => "Illinois",
    IN => "Indiana",
    IA => "Iowa",
    KS => "Kansas",
    KY => "Kentucky",
    LA => "Louisiana",
    ME => "Maine",
    MD => "Maryland",
    MA => "Massachusetts",
    MI => "Michigan",
    MN => "Minnesota",
    MS => "Mississippi",
    MO => "Missouri",
    MT => "Montana",
    NE => "Nebraska",
    NV => "Nevada",
    NH => "New Hampshire",
    NJ => "New Jersey",
    NM => "New Mexico",
    NY => "New York",
    NC => "North Carolina",
    ND => "North Dakota",
    OH => "Ohio",
    OK => "Oklahoma",
    OR => "Oregon",
    PA => "Pennsylvania",
    RI => "Rhode Island",
    SC => "South Carolina",
    SD => "South Dakota",
    TN => "Tennessee",
    TX => "Texas",
    UT => "Utah",
    VT => "Vermont",
    VA => "Virginia",
    WA => "Washington",
    WV => "West Virginia",
    WI => "Wisconsin",
    WY => "Wyoming",
}

impl UsState {
    /// Parses a postal code. Case-insensitive, surrounding whitespace ignored.
    pub fn parse(s: &str) -> Option<Self> {
        let code = s.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|state| state.as_str().eq_ignore_ascii_case(code))
    }
}

impl std::fmt::Display for UsState {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
