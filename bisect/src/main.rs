fn main() -> anyhow::Result<()> {
    bisect::run()
}
