pub const UPPERCASE: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";
pub const LOWERCASE: &[u8] = b"abcdefghijklmnopqrstuvwxyz";
pub const DIGITS: &[u8] = b"0123456789";
pub const SPECIAL: &[u8] = b"!@#$%^&*";

/// Uppercase, lowercase, digits and specials, in that order.
pub const POOL: &[u8] =
    b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789!@#$%^&*";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharClass {
    Uppercase,
    Lowercase,
    Digit,
    Special,
}

impl CharClass {
    pub const ALL: [CharClass; 4] = [
        CharClass::Uppercase,
        CharClass::Lowercase,
        CharClass::Digit,
        CharClass::Special,
    ];

    pub fn symbols(self) -> &'static [u8] {
        match self {
            CharClass::Uppercase => UPPERCASE,
            CharClass::Lowercase => LOWERCASE,
            CharClass::Digit => DIGITS,
            CharClass::Special => SPECIAL,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            CharClass::Uppercase => "uppercase",
            CharClass::Lowercase => "lowercase",
            CharClass::Digit => "digit",
            CharClass::Special => "special",
        }
    }

    pub fn of(ch: char) -> Option<CharClass> {
        let byte = u8::try_from(ch).ok()?;
        CharClass::ALL
            .into_iter()
            .find(|class| class.symbols().contains(&byte))
    }
}
