use serde::{Deserialize, Serialize};

/// Fixed cuisine taxonomy assigned to every stall.
///
/// Serialized with the display labels the directory shows (`"Chinese"`,
/// `"Others"`, ...). `Others` is the fallback when no keyword rule matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Cuisine {
    Dessert,
    Beverage,
    Fusion,
    Japanese,
    Korean,
    Thai,
    Vietnamese,
    Indonesian,
    Indian,
    Malay,
    Western,
    Mediterranean,
    Vegetarian,
    Chinese,
    Others,
}

impl Cuisine {
    /// Every label, `Others` last.
    pub const ALL: [Cuisine; 15] = [
        Cuisine::Dessert,
        Cuisine::Beverage,
        Cuisine::Fusion,
        Cuisine::Japanese,
        Cuisine::Korean,
        Cuisine::Thai,
        Cuisine::Vietnamese,
        Cuisine::Indonesian,
        Cuisine::Indian,
        Cuisine::Malay,
        Cuisine::Western,
        Cuisine::Mediterranean,
        Cuisine::Vegetarian,
        Cuisine::Chinese,
        Cuisine::Others,
    ];

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Cuisine::Dessert => "Dessert",
            Cuisine::Beverage => "Beverage",
            Cuisine::Fusion => "Fusion",
            Cuisine::Japanese => "Japanese",
            Cuisine::Korean => "Korean",
            Cuisine::Thai => "Thai",
            Cuisine::Vietnamese => "Vietnamese",
            Cuisine::Indonesian => "Indonesian",
            Cuisine::Indian => "Indian",
            Cuisine::Malay => "Malay",
            Cuisine::Western => "Western",
            Cuisine::Mediterranean => "Mediterranean",
            Cuisine::Vegetarian => "Vegetarian",
            Cuisine::Chinese => "Chinese",
            Cuisine::Others => "Others",
        }
    }
}

impl std::fmt::Display for Cuisine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl std::str::FromStr for Cuisine {
    type Err = String;

    /// Case-insensitive label lookup.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Cuisine::ALL
            .into_iter()
            .find(|c| c.label().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| format!("unknown cuisine \"{wanted}\""))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_str_is_case_insensitive() {
        assert_eq!("japanese".parse::<Cuisine>().unwrap(), Cuisine::Japanese);
        assert_eq!(" OTHERS ".parse::<Cuisine>().unwrap(), Cuisine::Others);
    }

    #[test]
    fn from_str_rejects_unknown_label() {
        assert!("Martian".parse::<Cuisine>().is_err());
    }

    #[test]
    fn serializes_as_display_label() {
        let json = serde_json::to_string(&Cuisine::Mediterranean).unwrap();
        assert_eq!(json, "\"Mediterranean\"");
    }

    #[test]
    fn all_labels_round_trip_through_display() {
        for cuisine in Cuisine::ALL {
            assert_eq!(cuisine.to_string().parse::<Cuisine>().unwrap(), cuisine);
        }
    }
}
