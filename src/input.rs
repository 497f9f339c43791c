//! X input mappings.

use x11_dl::keysym;
use x11_dl::xlib;

use serde::{Deserialize, Serialize};

/// Auto implement map.
macro_rules! key_map {
    (
        $name:ident {
            $(
                $field:ident => $sym:expr,
            )*
        }
    ) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
        pub enum $name {
            $($field,)*
            Unknown
        }

        impl From<$name> for u32 {
            fn from(sym: $name) -> Self {
                match sym {
                    $(
                        $name::$field => $sym,
                    )*
                    _ => 0
                }
            }
        }
    };
}

key_map! {
    Key {
        A => keysym::XK_a,
        B => keysym::XK_b,
        C => keysym::XK_c,
        D => keysym::XK_d,
        E => keysym::XK_e,
        F => keysym::XK_f,
        G => keysym::XK_g,
        H => keysym::XK_h,
        I => keysym::XK_i,
        J => keysym::XK_j,
        K => keysym::XK_k,
        L => keysym::XK_l,
        M => keysym::XK_m,
        N => keysym::XK_n,
        O => keysym::XK_o,
        P => keysym::XK_p,
        Q => keysym::XK_q,
        R => keysym::XK_r,
        S => keysym::XK_s,
        T => keysym::XK_t,
        U => keysym::XK_u,
        V => keysym::XK_v,
        W => keysym::XK_w,
        X => keysym::XK_x,
        Y => keysym::XK_y,
        Z => keysym::XK_z,
        Num1 => keysym::XK_1,
        Num2 => keysym::XK_2,
        Num3 => keysym::XK_3,
        Num4 => keysym::XK_4,
        F1 => keysym::XK_F1,
        F2 => keysym::XK_F2,
        F3 => keysym::XK_F3,
        F4 => keysym::XK_F4,
        Plus => keysym::XK_plus,
        Minus => keysym::XK_minus,
    }
}

key_map! {
    Button {
        Left => xlib::Button1,
        Middle => xlib::Button2,
        Right => xlib::Button3,
    }
}

key_map! {
    ModifierMask {
        Mod1 => xlib::Mod1Mask,  // Alt
        Mod2 => xlib::Mod2Mask,  // Num Lock
        Mod3 => xlib::Mod3Mask,  // Scroll Lock
        Mod4 => xlib::Mod4Mask,  // Super
        Shift => xlib::ShiftMask,
        CapsLock => xlib::LockMask,
        Control => xlib::ControlMask,
    }
}
