use bitflags::bitflags;

use crate::Key;

/// Modifier keys a hotkey may require.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Modifier {
    /// Either Alt key.
    Alt,
    /// Either Control key.
    Control,
    /// Either Shift key.
    Shift,
}

bitflags! {
    /// A set of hotkey modifiers.
    ///
    /// Bit values are the Win32 `MOD_ALT`, `MOD_CONTROL` and `MOD_SHIFT`
    /// constants, so `bits()` can be handed to `RegisterHotKey` directly.
    #[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
    pub struct Modifiers: u32 {
        /// `MOD_ALT`
        const ALT = 0x0001;
        /// `MOD_CONTROL`
        const CONTROL = 0x0002;
        /// `MOD_SHIFT`
        const SHIFT = 0x0004;
    }
}

impl TryFrom<Key> for Modifier {
    type Error = ();
    fn try_from(k: Key) -> Result<Self, Self::Error> {
        match k {
            Key::Alt | Key::RightAlt => Ok(Self::Alt),
            Key::Control | Key::RightControl => Ok(Self::Control),
            Key::Shift | Key::RightShift => Ok(Self::Shift),
            _ => Err(()),
        }
    }
}

impl From<Modifier> for Modifiers {
    fn from(m: Modifier) -> Self {
        match m {
            Modifier::Alt => Self::ALT,
            Modifier::Control => Self::CONTROL,
            Modifier::Shift => Self::SHIFT,
        }
    }
}

impl Modifier {
    /// Canonical order used when rendering a hotkey.
    pub const CANONICAL: [Self; 3] = [Self::Control, Self::Alt, Self::Shift];

    /// Parses a modifier specification string via key specs, then converts.
    ///
    /// Behavior mirrors `Key::from_spec`, so case-insensitive variant names and
    /// alias words (ctrl, menu, lshift, ...) are accepted. If the parsed key is
    /// not an Alt, Control or Shift key, parsing fails.
    pub fn from_spec(s: &str) -> Option<Self> {
        Key::from_spec(s).and_then(|k| Self::try_from(k).ok())
    }

    /// Returns the canonical, lowercase spec string for this modifier.
    pub fn to_spec(self) -> &'static str {
        match self {
            Self::Alt => "alt",
            Self::Control => "ctrl",
            Self::Shift => "shift",
        }
    }
}

impl Modifiers {
    /// Iterate the contained modifiers in canonical order.
    pub fn iter_canonical(self) -> impl Iterator<Item = Modifier> {
        Modifier::CANONICAL
            .into_iter()
            .filter(move |m| self.contains(Self::from(*m)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn either_side_maps_to_modifier() {
        assert_eq!(Modifier::try_from(Key::Control), Ok(Modifier::Control));
        assert_eq!(Modifier::try_from(Key::RightControl), Ok(Modifier::Control));
        assert_eq!(Modifier::try_from(Key::RightAlt), Ok(Modifier::Alt));
        assert_eq!(Modifier::try_from(Key::RightShift), Ok(Modifier::Shift));
        assert_eq!(Modifier::try_from(Key::LeftWindows), Err(()));
    }

    #[test]
    fn modifier_specs() {
        assert_eq!(Modifier::from_spec("ctrl"), Some(Modifier::Control));
        assert_eq!(Modifier::from_spec("CONTROL"), Some(Modifier::Control));
        assert_eq!(Modifier::from_spec("alt"), Some(Modifier::Alt));
        assert_eq!(Modifier::from_spec("menu"), Some(Modifier::Alt));
        assert_eq!(Modifier::from_spec("Shift"), Some(Modifier::Shift));
        assert_eq!(Modifier::from_spec("rshift"), Some(Modifier::Shift));
        // Windows keys are not hotkey modifiers here.
        assert_eq!(Modifier::from_spec("win"), None);
        assert_eq!(Modifier::from_spec("p"), None);
    }

    #[test]
    fn bits_match_win32() {
        let m = Modifiers::CONTROL | Modifiers::SHIFT;
        assert_eq!(m.bits(), 0x2 | 0x4);
        assert_eq!(Modifiers::ALT.bits(), 0x1);
    }

    #[test]
    fn canonical_iteration_order() {
        let all = Modifiers::all();
        let order: Vec<Modifier> = all.iter_canonical().collect();
        assert_eq!(order, vec![Modifier::Control, Modifier::Alt, Modifier::Shift]);
    }
}
