// header logo

pub const AURA_LOGO: &[&str] = &[
    r"  __ _ _   _ _ __ __ _ ",
    r" / _` | | | | '__/ _` |",
    r"| (_| | |_| | | | (_| |",
    r" \__,_|\__,_|_|  \__,_|",
];
