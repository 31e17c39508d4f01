fn main() -> anyhow::Result<()> {
    parsum::run()
}
