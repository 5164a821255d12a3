fn main() -> anyhow::Result<()> {
    gazeview::run()
}
