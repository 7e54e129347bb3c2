use crate::logging::{set_boxed_messenger, Messenger, ProgressPercent};

use indicatif::{ProgressBar, ProgressStyle};

pub struct ProgressPercentDefault {
    pb: ProgressBar,
}

impl ProgressPercentDefault {
    pub fn new(message: &str) -> Box<dyn ProgressPercent> {
        let pb = ProgressBar::new(1000);
        pb.set_style(
            ProgressStyle::default_bar()
                .template(
                    "{spinner:.green} [{elapsed_precise}] [{bar:60.cyan/blue}] {percent:>4}% {msg}",
                )
                .progress_chars("#>-"),
        );

        pb.set_message(message);

        Box::new(ProgressPercentDefault { pb: pb })
    }
}

impl ProgressPercent for ProgressPercentDefault {
    fn change_message(&self, new_message: &str) {
        self.pb.set_message(new_message);
    }

    fn progress_percent(&self, percent: f64) {
        self.pb.set_position((percent * 10.0) as u64);
    }
    fn finish(&self) {
        self.pb.finish();
    }
}

pub struct MessengerDefault {
    verbose: bool,
}

impl MessengerDefault {
    pub fn new(verbose: bool) -> MessengerDefault {
        MessengerDefault { verbose: verbose }
    }
}

impl Messenger for MessengerDefault {
    fn message(&self, message: &str) {
        let lns = message.split("\n");
        for (i, l) in lns.enumerate() {
            println!("{} {}", (if i == 0 { "MSG:" } else { "    " }), l);
        }
    }

    fn diagnostic(&self, message: &str) {
        if self.verbose {
            println!("DIAG: {}", message);
        }
    }

    fn start_progress_percent(&self, message: &str) -> Box<dyn ProgressPercent> {
        ProgressPercentDefault::new(message)
    }
}

pub fn register_messenger_default(verbose: bool) -> std::io::Result<()> {
    let msg = Box::new(MessengerDefault::new(verbose));
    set_boxed_messenger(msg)?;
    Ok(())
}
