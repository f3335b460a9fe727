use anyhow::Result;

fn main() -> Result<()> {
    prompt_bridge_cli::main_entry()
}
