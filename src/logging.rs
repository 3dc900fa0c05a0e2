use flexi_logger::Logger;

pub fn setup_logging() {
    Logger::try_with_env_or_str("info")  // Use the log level from the environment or fallback to "info"
        .unwrap()
        .start()
        .unwrap();
}
