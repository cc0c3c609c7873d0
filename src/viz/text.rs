//! Text markup, measurement, and truncation utilities.
//!
//! Labels use a small subset of ROOT's TLatex syntax: `#beta` for Greek letters,
//! `^{...}` / `_{...}` (or a single character) for super- and subscripts. Each
//! backend renders the parsed runs its own way, and layout relies on the width
//! heuristic below so no font files are needed.

/// Vertical placement of a run of text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Script {
    Normal,
    Super,
    Sub,
}

/// A contiguous piece of label text sharing one script level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextRun {
    pub text: String,
    pub script: Script,
}

/// Relative font size of super- and subscripts.
pub const SCRIPT_SCALE: f32 = 0.7;

const GREEK: [(&str, char); 48] = [
    ("alpha", 'α'),
    ("beta", 'β'),
    ("gamma", 'γ'),
    ("delta", 'δ'),
    ("epsilon", 'ε'),
    ("zeta", 'ζ'),
    ("eta", 'η'),
    ("theta", 'θ'),
    ("iota", 'ι'),
    ("kappa", 'κ'),
    ("lambda", 'λ'),
    ("mu", 'μ'),
    ("nu", 'ν'),
    ("xi", 'ξ'),
    ("omicron", 'ο'),
    ("pi", 'π'),
    ("rho", 'ρ'),
    ("sigma", 'σ'),
    ("tau", 'τ'),
    ("upsilon", 'υ'),
    ("phi", 'φ'),
    ("chi", 'χ'),
    ("psi", 'ψ'),
    ("omega", 'ω'),
    ("Alpha", 'Α'),
    ("Beta", 'Β'),
    ("Gamma", 'Γ'),
    ("Delta", 'Δ'),
    ("Epsilon", 'Ε'),
    ("Zeta", 'Ζ'),
    ("Eta", 'Η'),
    ("Theta", 'Θ'),
    ("Iota", 'Ι'),
    ("Kappa", 'Κ'),
    ("Lambda", 'Λ'),
    ("Mu", 'Μ'),
    ("Nu", 'Ν'),
    ("Xi", 'Ξ'),
    ("Omicron", 'Ο'),
    ("Pi", 'Π'),
    ("Rho", 'Ρ'),
    ("Sigma", 'Σ'),
    ("Tau", 'Τ'),
    ("Upsilon", 'Υ'),
    ("Phi", 'Φ'),
    ("Chi", 'Χ'),
    ("Psi", 'Ψ'),
    ("Omega", 'Ω'),
];

fn greek_letter(name: &str) -> Option<char> {
    GREEK.iter().find(|(n, _)| *n == name).map(|(_, c)| *c)
}

fn push_run(runs: &mut Vec<TextRun>, text: &str, script: Script) {
    if text.is_empty() {
        return;
    }
    if let Some(last) = runs.last_mut()
        && last.script == script
    {
        last.text.push_str(text);
        return;
    }
    runs.push(TextRun {
        text: text.to_string(),
        script,
    });
}

/// Replace `#name` Greek escapes; unknown names are kept verbatim.
fn expand_greek(src: &str) -> String {
    let mut out = String::with_capacity(src.len());
    let mut chars = src.chars().peekable();
    while let Some(ch) = chars.next() {
        if ch != '#' {
            out.push(ch);
            continue;
        }
        let mut name = String::new();
        while let Some(&c) = chars.peek() {
            if c.is_ascii_alphabetic() {
                name.push(c);
                chars.next();
            } else {
                break;
            }
        }
        match greek_letter(&name) {
            Some(g) => out.push(g),
            None => {
                out.push('#');
                out.push_str(&name);
            }
        }
    }
    out
}

/// Split a label into runs.
pub fn parse_markup(src: &str) -> Vec<TextRun> {
    let expanded = expand_greek(src);
    let mut runs: Vec<TextRun> = Vec::new();
    let mut normal = String::new();
    let mut chars = expanded.chars().peekable();

    while let Some(ch) = chars.next() {
        let script = match ch {
            '^' => Script::Super,
            '_' => Script::Sub,
            _ => {
                normal.push(ch);
                continue;
            }
        };
        let group: String = match chars.peek() {
            Some('{') => {
                chars.next();
                let mut g = String::new();
                for c in chars.by_ref() {
                    if c == '}' {
                        break;
                    }
                    g.push(c);
                }
                g
            }
            Some(_) => chars.next().map(String::from).unwrap_or_default(),
            None => {
                normal.push(ch);
                continue;
            }
        };
        push_run(&mut runs, &normal, Script::Normal);
        normal.clear();
        push_run(&mut runs, &group, script);
    }
    push_run(&mut runs, &normal, Script::Normal);
    runs
}

fn superscript(c: char) -> Option<char> {
    Some(match c {
        '0' => '⁰',
        '1' => '¹',
        '2' => '²',
        '3' => '³',
        '4' => '⁴',
        '5' => '⁵',
        '6' => '⁶',
        '7' => '⁷',
        '8' => '⁸',
        '9' => '⁹',
        '+' => '⁺',
        '-' => '⁻',
        '=' => '⁼',
        '(' => '⁽',
        ')' => '⁾',
        'n' => 'ⁿ',
        'i' => 'ⁱ',
        _ => return None,
    })
}

fn subscript(c: char) -> Option<char> {
    Some(match c {
        '0' => '₀',
        '1' => '₁',
        '2' => '₂',
        '3' => '₃',
        '4' => '₄',
        '5' => '₅',
        '6' => '₆',
        '7' => '₇',
        '8' => '₈',
        '9' => '₉',
        '+' => '₊',
        '-' => '₋',
        '=' => '₌',
        '(' => '₍',
        ')' => '₎',
        'a' => 'ₐ',
        'e' => 'ₑ',
        'o' => 'ₒ',
        'x' => 'ₓ',
        _ => return None,
    })
}

/// Flatten markup to plain Unicode (for backends without text rise).
/// Scripts that have no Unicode equivalent fall back to baseline text.
pub fn to_unicode(src: &str) -> String {
    let mut out = String::new();
    for run in parse_markup(src) {
        let map: fn(char) -> Option<char> = match run.script {
            Script::Normal => {
                out.push_str(&run.text);
                continue;
            }
            Script::Super => superscript,
            Script::Sub => subscript,
        };
        match run.text.chars().map(map).collect::<Option<String>>() {
            Some(mapped) => out.push_str(&mapped),
            None => out.push_str(&run.text),
        }
    }
    out
}

/// Heuristic: estimate pixel width of text (Plotters has no built-in text measuring).
pub fn estimate_text_width_px(text: &str, font_px: u32) -> u32 {
    ((text.chars().count() as f32) * (font_px as f32) * 0.60).ceil() as u32
}

/// Width estimate for a markup label, scripts counted at reduced size.
pub fn estimate_markup_width_px(src: &str, font_px: u32) -> u32 {
    parse_markup(src)
        .iter()
        .map(|run| {
            let px = match run.script {
                Script::Normal => font_px as f32,
                Script::Super | Script::Sub => font_px as f32 * SCRIPT_SCALE,
            };
            (run.text.chars().count() as f32) * px * 0.60
        })
        .sum::<f32>()
        .ceil() as u32
}

/// Truncate to fit `max_px` and add a single ellipsis if needed.
pub fn truncate_to_width(text: &str, font_px: u32, max_px: u32) -> String {
    let mut out = String::new();
    for ch in text.chars() {
        let next = format!("{out}{ch}");
        if estimate_text_width_px(&next, font_px) > max_px {
            if !out.is_empty() {
                if estimate_text_width_px(&(out.clone() + "…"), font_px) <= max_px {
                    out.push('…');
                } else if out.len() > 1 {
                    out.pop();
                    out.push('…');
                }
            }
            return out;
        }
        out = next;
    }
    out
}
