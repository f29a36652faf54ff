use monochord::{ConstraintSet, ContextFreeGrammar, NodeId, SententialForm, Tree};

mod ansi {
    pub const RESET: &str = "\x1b[0m";
    pub const DIM: &str = "\x1b[2m";
    pub const BOLD: &str = "\x1b[1m";

    pub const GREEN: &str = "\x1b[32m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const BLUE: &str = "\x1b[34m";
    pub const CYAN: &str = "\x1b[36m";
    pub const GRAY: &str = "\x1b[90m";

    pub struct Palette {
        enabled: bool,
    }

    impl Palette {
        pub fn new(enabled: bool) -> Self {
            Self { enabled }
        }

        pub fn paint(&self, s: impl AsRef<str>, color: &str) -> String {
            if self.enabled { format!("{}{}{}", color, s.as_ref(), RESET) } else { s.as_ref().to_string() }
        }

        pub fn bold(&self, s: impl AsRef<str>) -> String {
            if self.enabled { format!("{}{}{}", BOLD, s.as_ref(), RESET) } else { s.as_ref().to_string() }
        }

        pub fn dim(&self, s: impl AsRef<str>) -> String {
            if self.enabled { format!("{}{}{}", DIM, s.as_ref(), RESET) } else { s.as_ref().to_string() }
        }
    }
}

pub fn print_grammar(constraints: &ConstraintSet, grammar: &ContextFreeGrammar, color: bool) {
    let palette = ansi::Palette::new(color);

    println!("\n{}", palette.bold(palette.paint("⚙  Pitch grammar", ansi::CYAN)));

    println!("\n{}", palette.paint("━━━ Constraints ━━━", ansi::GRAY));
    print_constraints(constraints, &palette);

    println!("\n{}", palette.paint("━━━ Rules ━━━", ansi::GRAY));
    if grammar.rules().is_empty() {
        println!("{}", palette.dim("  No production rules"));
        println!("\n{}", palette.paint("Possible reasons:", ansi::YELLOW));
        println!("  • No pitch in the universe splits into two admitted factors");
        println!("  • The cent bound admits too few pitches (try raising --max-cents)");
        println!("  • The unison was not admitted (try --add-unison)");
        println!("\n{}", palette.dim("  Tip: Set MONOCHORD_DEBUG_GRAMMAR=1 to see enumeration details"));
    } else {
        for (idx, rule) in grammar.rules().iter().enumerate() {
            println!(
                "  {} {} {} {} {}",
                palette.paint(format!("[{idx}]"), ansi::GRAY),
                palette.bold(palette.paint(rule.left_side.to_string(), ansi::GREEN)),
                palette.dim("->"),
                palette.paint(rule.right_side[0].to_string(), ansi::BLUE),
                palette.paint(rule.right_side[1].to_string(), ansi::BLUE),
            );
        }
    }

    println!("\n{}", palette.paint("━━━ Symbols ━━━", ansi::GRAY));
    print_symbol_row("non-terminals:", grammar.non_terminals(), &palette, ansi::GREEN);
    print_symbol_row("terminals:    ", grammar.terminals(), &palette, ansi::YELLOW);
    println!();
}

pub fn print_derivation(tree: &Tree<SententialForm>, color: bool) {
    let palette = ansi::Palette::new(color);

    println!("{}", palette.paint("━━━ Derivation ━━━", ansi::GRAY));
    print_subtree(tree, tree.root(), &palette);

    let leaves: Vec<String> = tree.leaves().map(|leaf| tree.get(leaf).tag.clone()).collect();
    println!(
        "\n  {} {}",
        palette.dim("leaves:"),
        palette.bold(palette.paint(format!("({})", leaves.join(") (")), ansi::GREEN))
    );
    println!();
}

fn print_constraints(constraints: &ConstraintSet, palette: &ansi::Palette) {
    let primes = constraints
        .prime_exponent_bounds()
        .iter()
        .map(|(prime, bound)| format!("{prime}^±{bound}"))
        .collect::<Vec<_>>()
        .join(", ");
    println!(
        "  {} {}",
        palette.dim("primes:    "),
        if primes.is_empty() { palette.dim("none".to_string()) } else { palette.paint(primes, ansi::BLUE) }
    );
    println!(
        "  {} {}",
        palette.dim("max cents: "),
        palette.paint(format!("±{}", constraints.maximum_cent_deviation()), ansi::YELLOW)
    );
    println!(
        "  {} {}",
        palette.dim("unison:    "),
        palette.paint(if constraints.add_unison() { "added" } else { "excluded" }, ansi::CYAN)
    );
    let octaves =
        constraints.allowed_octaves().iter().map(ToString::to_string).collect::<Vec<_>>().join(", ");
    println!("  {} {}", palette.dim("octaves:   "), palette.paint(octaves, ansi::CYAN));
}

fn print_symbol_row(label: &str, symbols: &[monochord::PitchSymbol], palette: &ansi::Palette, color: &str) {
    if symbols.is_empty() {
        println!("  {} {}", palette.dim(label), palette.dim("none"));
        return;
    }
    let row = symbols.iter().map(ToString::to_string).collect::<Vec<_>>().join("  ");
    println!("  {} {}", palette.dim(label), palette.paint(row, color));
}

fn print_subtree(tree: &Tree<SententialForm>, node: NodeId, palette: &ansi::Palette) {
    let indent = "  ".repeat(tree.depth(node) + 1);
    let entry = tree.get(node);
    let is_leaf = tree.children(node).is_empty();
    let tag = format!("({})", entry.tag);
    if is_leaf {
        println!("{indent}{}", palette.paint(tag, ansi::GREEN));
    } else {
        println!("{indent}{}", palette.dim(tag));
    }
    for &child in tree.children(node) {
        print_subtree(tree, child, palette);
    }
}
