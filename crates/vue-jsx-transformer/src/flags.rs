//! Runtime optimization flags emitted into vnode calls.

use bitflags::bitflags;

bitflags! {
    /// Hints passed as the fourth argument of `createVNode`, telling the
    /// runtime which parts of a vnode can change between renders.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct PatchFlags: u32 {
        /// Dynamic text content.
        const TEXT = 1;
        /// Dynamic `class` binding.
        const CLASS = 1 << 1;
        /// Dynamic `style` binding.
        const STYLE = 1 << 2;
        /// Dynamic props other than class and style, listed in the fifth argument.
        const PROPS = 1 << 3;
        /// Props with dynamic keys; the whole props object must be diffed.
        const FULL_PROPS = 1 << 4;
        /// Event listeners that need attaching during hydration.
        const HYDRATE_EVENTS = 1 << 5;
        /// The vnode carries a ref or directives and must be patched anyway.
        const NEED_PATCH = 1 << 9;
    }
}

/// Stability of a component's slots object, stored under the `_` key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum SlotFlags {
    /// Slot content only depends on the slot's own scope.
    #[default]
    Stable = 1,
    /// Slot content references a binding from an enclosing scope.
    Dynamic = 2,
    /// Slots forwarded from a parent component.
    Forwarded = 3,
}

impl SlotFlags {
    /// Returns the numeric value emitted into the slots object.
    pub fn value(self) -> u8 {
        self as u8
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_patch_flag_values() {
        assert_eq!(PatchFlags::TEXT.bits(), 1);
        assert_eq!(PatchFlags::PROPS.bits(), 8);
        assert_eq!(PatchFlags::FULL_PROPS.bits(), 16);
        assert_eq!(PatchFlags::HYDRATE_EVENTS.bits(), 32);
        assert_eq!(PatchFlags::NEED_PATCH.bits(), 512);
        assert_eq!((PatchFlags::CLASS | PatchFlags::STYLE).bits(), 6);
    }

    #[test]
    fn test_slot_flag_values() {
        assert_eq!(SlotFlags::default().value(), 1);
        assert_eq!(SlotFlags::Dynamic.value(), 2);
        assert_eq!(SlotFlags::Forwarded.value(), 3);
    }
}
