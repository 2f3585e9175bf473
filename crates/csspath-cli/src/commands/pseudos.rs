use csspath_compiler::pseudo::registry;

pub struct PseudosArgs;

pub fn run(_args: PseudosArgs) {
    print!("{}", render_names(registry().names()));
}

/// Sorted, one `:name` per line.
pub fn render_names<'a>(names: impl Iterator<Item = &'a str>) -> String {
    let mut names: Vec<&str> = names.collect();
    names.sort_unstable();
    names.iter().map(|name| format!(":{name}\n")).collect()
}
