use std::io::{self, Read};

use serialport::SerialPort;

use super::ByteSource;
use crate::config::SerialConfig;
use crate::error::TransportError;

/// A serial port opened 8N1, no flow control, reading with a short timeout.
pub struct SerialSource {
    port: Box<dyn SerialPort>,
    name: String,
}

impl SerialSource {
    pub fn open(config: &SerialConfig) -> Result<Self, TransportError> {
        let port = serialport::new(&config.port, config.baud_rate)
            .data_bits(serialport::DataBits::Eight)
            .parity(serialport::Parity::None)
            .stop_bits(serialport::StopBits::One)
            .flow_control(serialport::FlowControl::None)
            .timeout(config.read_timeout())
            .open()
            .map_err(|source| TransportError::Open {
                port: config.port.clone(),
                baud_rate: config.baud_rate,
                source,
            })?;
        log::info!("Opened serial port {} at {} baud", config.port, config.baud_rate);
        Ok(SerialSource {
            port,
            name: format!("{} @ {} baud", config.port, config.baud_rate),
        })
    }
}

impl ByteSource for SerialSource {
    fn receive(&mut self) -> Result<Option<u8>, TransportError> {
        let mut byte = [0u8; 1];
        match self.port.read(&mut byte) {
            Ok(0) => Ok(None),
            Ok(_) => Ok(Some(byte[0])),
            Err(e) if matches!(e.kind(), io::ErrorKind::TimedOut | io::ErrorKind::WouldBlock | io::ErrorKind::Interrupted) => {
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }

    fn describe(&self) -> String {
        self.name.clone()
    }
}

/// Names of the serial ports present on this machine.
pub fn list_ports() -> Result<Vec<String>, TransportError> {
    let ports = serialport::available_ports().map_err(TransportError::ListPorts)?;
    Ok(ports.into_iter().map(|p| p.port_name).collect())
}
