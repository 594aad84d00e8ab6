const FLAG_AA: u16 = 0x0400;
const FLAG_TC: u16 = 0x0200;
const FLAG_RD: u16 = 0x0100;
const FLAG_RA: u16 = 0x0080;
const OPCODE_SHIFT: u16 = 11;
const OPCODE_MASK: u16 = 0x7800;
const RCODE_MASK: u16 = 0x000F;

/// Bit that marks a message as a response in the flags word.
pub const FLAG_QR: u16 = 0x8000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MessageHeader {
    pub id: u16,

    pub is_response: bool,

    /// Remaining 15 flag bits (opcode, AA, TC, RD, RA, Z, RCODE), QR excluded.
    pub flags: u16,
}

impl MessageHeader {
    pub fn new(id: u16) -> Self {
        Self {
            id,
            is_response: false,
            flags: 0,
        }
    }

    /// Splits a raw wire flags word into the response bit and the rest.
    pub fn from_wire(id: u16, raw_flags: u16) -> Self {
        Self {
            id,
            is_response: raw_flags & FLAG_QR != 0,
            flags: raw_flags & !FLAG_QR,
        }
    }

    pub fn wire_flags(&self) -> u16 {
        if self.is_response {
            self.flags | FLAG_QR
        } else {
            self.flags
        }
    }

    pub fn opcode(&self) -> u8 {
        ((self.flags & OPCODE_MASK) >> OPCODE_SHIFT) as u8
    }

    pub fn authoritative(&self) -> bool {
        self.flags & FLAG_AA != 0
    }

    pub fn truncated(&self) -> bool {
        self.flags & FLAG_TC != 0
    }

    pub fn set_truncated(&mut self, value: bool) {
        self.set_flag(FLAG_TC, value);
    }

    pub fn recursion_desired(&self) -> bool {
        self.flags & FLAG_RD != 0
    }

    pub fn set_recursion_desired(&mut self, value: bool) {
        self.set_flag(FLAG_RD, value);
    }

    pub fn recursion_available(&self) -> bool {
        self.flags & FLAG_RA != 0
    }

    pub fn set_recursion_available(&mut self, value: bool) {
        self.set_flag(FLAG_RA, value);
    }

    pub fn response_code(&self) -> ResponseCode {
        ResponseCode::from_u8((self.flags & RCODE_MASK) as u8)
    }

    pub fn set_response_code(&mut self, code: ResponseCode) {
        self.flags = (self.flags & !RCODE_MASK) | (code.to_u8() as u16 & RCODE_MASK);
    }

    fn set_flag(&mut self, bit: u16, value: bool) {
        if value {
            self.flags |= bit;
        } else {
            self.flags &= !bit;
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseCode {
    NoError,
    FormErr,
    ServFail,
    NxDomain,
    NotImp,
    Refused,
    Other(u8),
}

impl ResponseCode {
    pub fn from_u8(value: u8) -> Self {
        match value {
            0 => Self::NoError,
            1 => Self::FormErr,
            2 => Self::ServFail,
            3 => Self::NxDomain,
            4 => Self::NotImp,
            5 => Self::Refused,
            other => Self::Other(other),
        }
    }

    pub fn to_u8(self) -> u8 {
        match self {
            Self::NoError => 0,
            Self::FormErr => 1,
            Self::ServFail => 2,
            Self::NxDomain => 3,
            Self::NotImp => 4,
            Self::Refused => 5,
            Self::Other(value) => value,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NoError => "NOERROR",
            Self::FormErr => "FORMERR",
            Self::ServFail => "SERVFAIL",
            Self::NxDomain => "NXDOMAIN",
            Self::NotImp => "NOTIMP",
            Self::Refused => "REFUSED",
            Self::Other(_) => "UNKNOWN",
        }
    }
}
