// Orca Testkit - Bare-Metal Test Image Support
// Copyright (C) 2026 Andrii Shylenko
//
// This software is released under the MIT License.
// See the LICENSE file in the project root for full license information.

// CSR numbers are immediates in the instruction encoding, so each access
// below is its own `asm!` with a `const` operand. The blocks are not `nomem`:
// they act as compiler barriers around surrounding loads and stores.
#[cfg(target_arch = "riscv32")]
macro_rules! csrr {
    ($num:literal) => {{
        let value: u32;
        // SAFETY: `$num` is an implemented CSR from the map below; reading it
        // has no side effects.
        unsafe {
            core::arch::asm!("csrr {0}, {csr}", out(reg) value, csr = const $num, options(nostack));
        }
        value
    }};
}

#[cfg(target_arch = "riscv32")]
macro_rules! csrw {
    ($num:literal, $value:expr) => {{
        let value: u32 = $value;
        // SAFETY: `$num` is a writable CSR from the map below.
        unsafe {
            core::arch::asm!("csrw {csr}, {0}", in(reg) value, csr = const $num, options(nostack));
        }
    }};
}

macro_rules! csr_map {
    (
        read_only {
            $( $(#[$ro_meta:meta])* $ro:ident = $ro_num:literal => $ro_name:literal, )*
        }
        read_write {
            $( $(#[$rw_meta:meta])* $rw:ident = $rw_num:literal => $rw_name:literal, )*
        }
    ) => {
        /// A CSR implemented by the core. The discriminant is the CSR number.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[repr(u16)]
        pub enum Csr {
            $( $(#[$ro_meta])* $ro = $ro_num, )*
            $( $(#[$rw_meta])* $rw = $rw_num, )*
        }

        /// A CSR that accepts writes.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[repr(u16)]
        pub enum WritableCsr {
            $( $(#[$rw_meta])* $rw = $rw_num, )*
        }

        impl Csr {
            pub const ALL: &'static [Csr] = &[ $( Csr::$ro, )* $( Csr::$rw, )* ];

            pub const fn number(self) -> u16 {
                self as u16
            }

            /// Assembler name of the register.
            pub const fn name(self) -> &'static str {
                match self {
                    $( Csr::$ro => $ro_name, )*
                    $( Csr::$rw => $rw_name, )*
                }
            }

            pub const fn writable(self) -> Option<WritableCsr> {
                match self {
                    $( Csr::$ro => None, )*
                    $( Csr::$rw => Some(WritableCsr::$rw), )*
                }
            }

            pub const fn is_writable(self) -> bool {
                self.writable().is_some()
            }
        }

        impl WritableCsr {
            pub const ALL: &'static [WritableCsr] = &[ $( WritableCsr::$rw, )* ];

            pub const fn csr(self) -> Csr {
                match self {
                    $( WritableCsr::$rw => Csr::$rw, )*
                }
            }

            pub const fn number(self) -> u16 {
                self as u16
            }
        }

        impl From<WritableCsr> for Csr {
            fn from(csr: WritableCsr) -> Self {
                csr.csr()
            }
        }

        #[cfg(target_arch = "riscv32")]
        impl crate::machine::MachineCsrs {
            #[inline(always)]
            pub(crate) fn csrr(csr: Csr) -> u32 {
                match csr {
                    $( Csr::$ro => csrr!($ro_num), )*
                    $( Csr::$rw => csrr!($rw_num), )*
                }
            }

            #[inline(always)]
            pub(crate) fn csrw(csr: WritableCsr, value: u32) {
                match csr {
                    $( WritableCsr::$rw => csrw!($rw_num, value), )*
                }
            }
        }
    };
}

csr_map! {
    read_only {
        /// External interrupt pending, one bit per source.
        Meipend = 0xFC0 => "meipend",
        /// Cache existence flags, fixed by the hardware build.
        Mcache = 0xBC0 => "mcache",
        /// Free-running cycle counter.
        Time = 0xC01 => "time",
    }
    read_write {
        /// External interrupt mask, one bit per source.
        Meimask = 0x7C0 => "meimask",

        Mamr0Base = 0xBD0 => "mamr0_base",
        Mamr1Base = 0xBD1 => "mamr1_base",
        Mamr2Base = 0xBD2 => "mamr2_base",
        Mamr3Base = 0xBD3 => "mamr3_base",
        Mamr0Last = 0xBD8 => "mamr0_last",
        Mamr1Last = 0xBD9 => "mamr1_last",
        Mamr2Last = 0xBDA => "mamr2_last",
        Mamr3Last = 0xBDB => "mamr3_last",

        Mumr0Base = 0xBE0 => "mumr0_base",
        Mumr1Base = 0xBE1 => "mumr1_base",
        Mumr2Base = 0xBE2 => "mumr2_base",
        Mumr3Base = 0xBE3 => "mumr3_base",
        Mumr0Last = 0xBE8 => "mumr0_last",
        Mumr1Last = 0xBE9 => "mumr1_last",
        Mumr2Last = 0xBEA => "mumr2_last",
        Mumr3Last = 0xBEB => "mumr3_last",
    }
}
