//! SI prefixes used to derive `km`, `mg`, `µs` and friends from base units.

/// One SI prefix.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SiPrefix {
    /// Abbreviation prepended to the unit symbol (`"k"`, `"µ"`).
    pub symbol: &'static str,
    /// ASCII-only variant of the abbreviation (`"mu"` for micro).
    pub ascii: &'static str,
    /// Name prepended to the unit name (`"kilo"`).
    pub name: &'static str,
    /// Multiplier.
    pub factor: f64,
}

const fn p(symbol: &'static str, ascii: &'static str, name: &'static str, factor: f64) -> SiPrefix {
    SiPrefix {
        symbol,
        ascii,
        name,
        factor,
    }
}

/// All prefixes from yocto to yotta.
pub const SI_PREFIXES: [SiPrefix; 20] = [
    p("y", "y", "yocto", 1e-24),
    p("z", "z", "zepto", 1e-21),
    p("a", "a", "atto", 1e-18),
    p("f", "f", "femto", 1e-15),
    p("p", "p", "pico", 1e-12),
    p("n", "n", "nano", 1e-9),
    p("µ", "mu", "micro", 1e-6),
    p("m", "m", "milli", 1e-3),
    p("c", "c", "centi", 1e-2),
    p("d", "d", "deci", 1e-1),
    p("da", "da", "deca", 1e1),
    p("h", "h", "hecto", 1e2),
    p("k", "k", "kilo", 1e3),
    p("M", "M", "mega", 1e6),
    p("G", "G", "giga", 1e9),
    p("T", "T", "tera", 1e12),
    p("P", "P", "peta", 1e15),
    p("E", "E", "exa", 1e18),
    p("Z", "Z", "zetta", 1e21),
    p("Y", "Y", "yotta", 1e24),
];

/// Looks up a prefix by its symbol (either the display or ASCII form).
pub fn prefix_by_symbol(symbol: &str) -> Option<&'static SiPrefix> {
    SI_PREFIXES
        .iter()
        .find(|p| p.symbol == symbol || p.ascii == symbol)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup() {
        assert_eq!(prefix_by_symbol("k").map(|p| p.factor), Some(1e3));
        assert_eq!(prefix_by_symbol("mu").map(|p| p.name), Some("micro"));
        assert_eq!(prefix_by_symbol("µ").map(|p| p.name), Some("micro"));
        assert!(prefix_by_symbol("q").is_none());
    }

    #[test]
    fn test_ordered_ascending() {
        assert!(SI_PREFIXES.windows(2).all(|w| w[0].factor < w[1].factor));
    }
}
