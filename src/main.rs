use log::error;
use podium::controller::controller_handler::Controller;

#[tokio::main]
async fn main() {
    // Example how to log
    // https://docs.rs/env_logger/latest/env_logger/
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .format_target(false)
        .init();

    println!(
        "
██████╗  ██████╗ ██████╗ ██╗██╗   ██╗███╗   ███╗
██╔══██╗██╔═══██╗██╔══██╗██║██║   ██║████╗ ████║
██████╔╝██║   ██║██║  ██║██║██║   ██║██╔████╔██║
██╔═══╝ ██║   ██║██║  ██║██║██║   ██║██║╚██╔╝██║
██║     ╚██████╔╝██████╔╝██║╚██████╔╝██║ ╚═╝ ██║
╚═╝      ╚═════╝ ╚═════╝ ╚═╝ ╚═════╝ ╚═╝     ╚═╝
================================================
       Conference program service v0.1.0
================================================
"
    );

    let controller = Controller::new()
        .map_err(|e| {
            error!("Unable to create a controller instance: {}, exiting...", e);
            std::process::exit(1);
        })
        .unwrap();

    controller
        .run()
        .await
        .map_err(|e| {
            error!("Error occured in the controller process: {}, exiting...", e);
            std::process::exit(1);
        })
        .unwrap();
}

#[cfg(test)]
mod tests {
    #[test]
    fn it_works() {
        assert_eq!(2 + 2, 4);
    }
}
