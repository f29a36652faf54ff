#[macro_export]
macro_rules! ji {
    ($lit:literal) => {{
        static PITCH: once_cell::sync::Lazy<$crate::JustIntonationPitch> =
            once_cell::sync::Lazy::new(|| $lit.parse().unwrap());
        *PITCH
    }};
}

#[macro_export]
macro_rules! nt {
    ($lit:literal) => {
        $crate::PitchSymbol::NonTerminal($crate::ji!($lit))
    };
}

#[macro_export]
macro_rules! term {
    ($lit:literal) => {
        $crate::PitchSymbol::Terminal($crate::ji!($lit))
    };
}
