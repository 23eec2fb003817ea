//! Five byte frames exchanged with the sorting bin's controller.
//!
//! Host to controller: `30 CF <code> CF 30`, one per verdict.
//! Controller to host: `03 FC <code> FC 03`, status and alarms.

use std::io::Write;

use anyhow::Result;

use crate::common::WasteCategory;

pub const FRAME_LEN: usize = 5;

const COMMAND_OUTER: u8 = 0x30;
const COMMAND_INNER: u8 = 0xCF;
const STATUS_OUTER: u8 = 0x03;
const STATUS_INNER: u8 = 0xFC;

/// Bin flap the controller should open for a verdict.
pub fn command_code(category: WasteCategory) -> u8 {
    match category {
        WasteCategory::Recyclable => 0x01,
        WasteCategory::Kitchen => 0x02,
        WasteCategory::Hazardous => 0x04,
        WasteCategory::Other => 0x08,
        WasteCategory::RecognitionFailed => 0xFF,
    }
}

pub fn encode_command(category: WasteCategory) -> [u8; FRAME_LEN] {
    [COMMAND_OUTER, COMMAND_INNER, command_code(category), COMMAND_INNER, COMMAND_OUTER]
}

pub fn decode_command(frame: &[u8]) -> Result<WasteCategory> {
    let code = unwrap_frame(frame, COMMAND_OUTER, COMMAND_INNER)?;
    WasteCategory::ALL
        .into_iter()
        .find(|c| command_code(*c) == code)
        .ok_or_else(|| anyhow::anyhow!("Unknown command code {code:#04x}"))
}

/// Writes the command frame for `category` and flushes.
pub fn send_command<W: Write>(out: &mut W, category: WasteCategory) -> Result<()> {
    out.write_all(&encode_command(category))?;
    out.flush()?;
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SorterEvent {
    CancelAlarm,
    CaptureRequested,
    DeliveryDone,
    FullLoadAlarm,
    TiltAlarm,
    Idle,
}

impl SorterEvent {
    pub fn code(&self) -> u8 {
        match self {
            SorterEvent::CancelAlarm => 0x00,
            SorterEvent::CaptureRequested => 0x01,
            SorterEvent::DeliveryDone => 0x02,
            SorterEvent::FullLoadAlarm => 0x04,
            SorterEvent::TiltAlarm => 0x08,
            SorterEvent::Idle => 0xFF,
        }
    }

    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0x00 => Some(SorterEvent::CancelAlarm),
            0x01 => Some(SorterEvent::CaptureRequested),
            0x02 => Some(SorterEvent::DeliveryDone),
            0x04 => Some(SorterEvent::FullLoadAlarm),
            0x08 => Some(SorterEvent::TiltAlarm),
            0xFF => Some(SorterEvent::Idle),
            _ => None,
        }
    }

    pub fn encode(&self) -> [u8; FRAME_LEN] {
        [STATUS_OUTER, STATUS_INNER, self.code(), STATUS_INNER, STATUS_OUTER]
    }

    pub fn decode(frame: &[u8]) -> Result<Self> {
        let code = unwrap_frame(frame, STATUS_OUTER, STATUS_INNER)?;
        Self::from_code(code).ok_or_else(|| anyhow::anyhow!("Unknown status code {code:#04x}"))
    }
}

fn unwrap_frame(frame: &[u8], outer: u8, inner: u8) -> Result<u8> {
    if frame.len() < FRAME_LEN {
        anyhow::bail!("Frame too short: {} bytes, expected {}", frame.len(), FRAME_LEN);
    }
    match frame[..FRAME_LEN] {
        [o1, i1, code, i2, o2] if o1 == outer && o2 == outer && i1 == inner && i2 == inner => Ok(code),
        _ => anyhow::bail!("Malformed frame {:02X?}", &frame[..FRAME_LEN]),
    }
}
