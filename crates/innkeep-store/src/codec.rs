//! # Fixed-Record Codec
//!
//! Binary layout of every entity as a fixed-size record block.
//!
//! ## Record Layout
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                   Fixed-Record Encoding                                 │
//! │                                                                         │
//! │  file = record ++ record ++ record ...   (no header, no index)         │
//! │                                                                         │
//! │  one record, RECORD_SIZE bytes:                                        │
//! │  ┌──────┬───────────────┬──────┬─────────┬──────────────────┬───────┐  │
//! │  │ u32  │ str (padded)  │ u8   │ f64     │ str (padded)     │ bool  │  │
//! │  │  LE  │ NUL-filled    │ tag  │ LE bits │ NUL-filled       │ u8    │  │
//! │  └──────┴───────────────┴──────┴─────────┴──────────────────┴───────┘  │
//! │                                                                         │
//! │  Strings: UTF-8 bytes, SILENTLY truncated at the last char boundary    │
//! │  that fits, remainder filled with NUL. Decoding trims trailing NULs.   │
//! │  Enums: single byte tag; an unknown tag is a decode error.             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Field capacities follow the entity definitions: names 50, addresses 100,
//! phones 20, emails 50, free-text notes 200, descriptions 100, feature
//! lists 200, dates 10, timestamps 19.

use innkeep_core::types::{
    BillingItem, BillingItemType, Guest, Invoice, InvoiceStatus, Payment, PaymentMethod,
    PaymentStatus, Reservation, ReservationStatus, Room, RoomStatus, RoomType, User, UserRole,
    VipStatus,
};

// =============================================================================
// FixedRecord Trait
// =============================================================================

/// A decode failure local to one record block; the store layer attaches the
/// file path and byte offset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodeError {
    pub field: &'static str,
    pub value: u8,
}

impl std::fmt::Display for DecodeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "field `{}` has invalid tag byte {}", self.field, self.value)
    }
}

/// An entity that serializes to a fixed-size binary block.
///
/// `encode` writes exactly [`FixedRecord::RECORD_SIZE`] bytes; `decode`
/// reads the same. Both are infallible on I/O (they work on slices); only
/// an unknown enum tag fails decoding.
pub trait FixedRecord: Sized {
    /// Exact on-disk size of one record, in bytes.
    const RECORD_SIZE: usize;

    /// Entity name used in diagnostics ("user", "room", ...).
    const ENTITY: &'static str;

    fn encode(&self, buf: &mut [u8]);

    fn decode(buf: &[u8]) -> Result<Self, DecodeError>;

    /// The record's primary id.
    fn id(&self) -> u32;

    /// Soft-delete flag; inactive records stay on disk.
    fn is_active(&self) -> bool;
}

// =============================================================================
// Field Cursors
// =============================================================================

/// Sequential writer over a record buffer.
pub(crate) struct FieldWriter<'a> {
    buf: &'a mut [u8],
    pos: usize,
}

impl<'a> FieldWriter<'a> {
    pub(crate) fn new(buf: &'a mut [u8]) -> Self {
        FieldWriter { buf, pos: 0 }
    }

    pub(crate) fn put_u8(&mut self, value: u8) {
        self.buf[self.pos] = value;
        self.pos += 1;
    }

    pub(crate) fn put_bool(&mut self, value: bool) {
        self.put_u8(value as u8);
    }

    pub(crate) fn put_u32(&mut self, value: u32) {
        self.buf[self.pos..self.pos + 4].copy_from_slice(&value.to_le_bytes());
        self.pos += 4;
    }

    pub(crate) fn put_f64(&mut self, value: f64) {
        self.buf[self.pos..self.pos + 8].copy_from_slice(&value.to_le_bytes());
        self.pos += 8;
    }

    /// Writes a string into a `width`-byte field: UTF-8 bytes truncated at
    /// the last char boundary that fits, NUL-padded to `width`.
    pub(crate) fn put_str(&mut self, value: &str, width: usize) {
        let bytes = value.as_bytes();
        let mut end = width.min(bytes.len());
        while end > 0 && !value.is_char_boundary(end) {
            end -= 1;
        }
        self.buf[self.pos..self.pos + end].copy_from_slice(&bytes[..end]);
        self.buf[self.pos + end..self.pos + width].fill(0);
        self.pos += width;
    }

    #[cfg(test)]
    pub(crate) fn written(&self) -> usize {
        self.pos
    }
}

/// Sequential reader over a record buffer.
pub(crate) struct FieldReader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> FieldReader<'a> {
    pub(crate) fn new(buf: &'a [u8]) -> Self {
        FieldReader { buf, pos: 0 }
    }

    pub(crate) fn take_u8(&mut self) -> u8 {
        let value = self.buf[self.pos];
        self.pos += 1;
        value
    }

    pub(crate) fn take_bool(&mut self) -> bool {
        self.take_u8() != 0
    }

    pub(crate) fn take_u32(&mut self) -> u32 {
        let mut bytes = [0u8; 4];
        bytes.copy_from_slice(&self.buf[self.pos..self.pos + 4]);
        self.pos += 4;
        u32::from_le_bytes(bytes)
    }

    pub(crate) fn take_f64(&mut self) -> f64 {
        let mut bytes = [0u8; 8];
        bytes.copy_from_slice(&self.buf[self.pos..self.pos + 8]);
        self.pos += 8;
        f64::from_le_bytes(bytes)
    }

    /// Reads a `width`-byte string field, trimming trailing NUL padding.
    pub(crate) fn take_str(&mut self, width: usize) -> String {
        let field = &self.buf[self.pos..self.pos + width];
        self.pos += width;
        let end = field.iter().rposition(|&b| b != 0).map_or(0, |i| i + 1);
        String::from_utf8_lossy(&field[..end]).into_owned()
    }

    /// Reads an enum tag byte and converts it, reporting the field name on
    /// an unknown tag.
    pub(crate) fn take_tag<T>(
        &mut self,
        field: &'static str,
        from_u8: fn(u8) -> Option<T>,
    ) -> Result<T, DecodeError> {
        let value = self.take_u8();
        from_u8(value).ok_or(DecodeError { field, value })
    }
}

// =============================================================================
// Field Widths
// =============================================================================

// Username width is shared with the validation layer, which rejects
// over-length names before they reach the truncating writer.
const USERNAME_LEN: usize = innkeep_core::validation::USERNAME_MAX_BYTES;
const PASSWORD_HASH_LEN: usize = 64;
const NAME_LEN: usize = 50;
const ADDRESS_LEN: usize = 100;
const PHONE_LEN: usize = 20;
const EMAIL_LEN: usize = 50;
const ID_TYPE_LEN: usize = 20;
const ID_NUMBER_LEN: usize = 20;
const DATE_LEN: usize = 10;
const TIMESTAMP_LEN: usize = 19;
const DESCRIPTION_LEN: usize = 100;
const FEATURES_LEN: usize = 200;
const NOTES_LEN: usize = 200;
const TRANSACTION_ID_LEN: usize = 50;

// =============================================================================
// User
// =============================================================================

impl FixedRecord for User {
    // id 4 + username 20 + hash 64 + name 50 + role 1 + last_login 19 + active 1
    const RECORD_SIZE: usize = 4 + USERNAME_LEN + PASSWORD_HASH_LEN + NAME_LEN + 1 + TIMESTAMP_LEN + 1;
    const ENTITY: &'static str = "user";

    fn encode(&self, buf: &mut [u8]) {
        let mut w = FieldWriter::new(buf);
        w.put_u32(self.id);
        w.put_str(&self.username, USERNAME_LEN);
        w.put_str(&self.password_hash, PASSWORD_HASH_LEN);
        w.put_str(&self.full_name, NAME_LEN);
        w.put_u8(self.role.as_u8());
        w.put_str(&self.last_login, TIMESTAMP_LEN);
        w.put_bool(self.is_active);
    }

    fn decode(buf: &[u8]) -> Result<Self, DecodeError> {
        let mut r = FieldReader::new(buf);
        Ok(User {
            id: r.take_u32(),
            username: r.take_str(USERNAME_LEN),
            password_hash: r.take_str(PASSWORD_HASH_LEN),
            full_name: r.take_str(NAME_LEN),
            role: r.take_tag("role", UserRole::from_u8)?,
            last_login: r.take_str(TIMESTAMP_LEN),
            is_active: r.take_bool(),
        })
    }

    fn id(&self) -> u32 {
        self.id
    }

    fn is_active(&self) -> bool {
        self.is_active
    }
}

// =============================================================================
// Room
// =============================================================================

impl FixedRecord for Room {
    // id 4 + type 1 + status 1 + rate 8 + capacity 4 + floor 4
    //   + description 100 + features 200 + active 1
    const RECORD_SIZE: usize = 4 + 1 + 1 + 8 + 4 + 4 + DESCRIPTION_LEN + FEATURES_LEN + 1;
    const ENTITY: &'static str = "room";

    fn encode(&self, buf: &mut [u8]) {
        let mut w = FieldWriter::new(buf);
        w.put_u32(self.id);
        w.put_u8(self.room_type.as_u8());
        w.put_u8(self.status.as_u8());
        w.put_f64(self.rate);
        w.put_u32(self.capacity);
        w.put_u32(self.floor);
        w.put_str(&self.description, DESCRIPTION_LEN);
        w.put_str(&self.features, FEATURES_LEN);
        w.put_bool(self.is_active);
    }

    fn decode(buf: &[u8]) -> Result<Self, DecodeError> {
        let mut r = FieldReader::new(buf);
        Ok(Room {
            id: r.take_u32(),
            room_type: r.take_tag("room_type", RoomType::from_u8)?,
            status: r.take_tag("status", RoomStatus::from_u8)?,
            rate: r.take_f64(),
            capacity: r.take_u32(),
            floor: r.take_u32(),
            description: r.take_str(DESCRIPTION_LEN),
            features: r.take_str(FEATURES_LEN),
            is_active: r.take_bool(),
        })
    }

    fn id(&self) -> u32 {
        self.id
    }

    fn is_active(&self) -> bool {
        self.is_active
    }
}

// =============================================================================
// Guest
// =============================================================================

impl FixedRecord for Guest {
    // id 4 + name 50 + address 100 + phone 20 + email 50 + id_type 20
    //   + id_number 20 + reg_date 10 + stays 4 + spent 8 + vip 1
    //   + notes 200 + active 1
    const RECORD_SIZE: usize = 4
        + NAME_LEN
        + ADDRESS_LEN
        + PHONE_LEN
        + EMAIL_LEN
        + ID_TYPE_LEN
        + ID_NUMBER_LEN
        + DATE_LEN
        + 4
        + 8
        + 1
        + NOTES_LEN
        + 1;
    const ENTITY: &'static str = "guest";

    fn encode(&self, buf: &mut [u8]) {
        let mut w = FieldWriter::new(buf);
        w.put_u32(self.id);
        w.put_str(&self.name, NAME_LEN);
        w.put_str(&self.address, ADDRESS_LEN);
        w.put_str(&self.phone, PHONE_LEN);
        w.put_str(&self.email, EMAIL_LEN);
        w.put_str(&self.id_type, ID_TYPE_LEN);
        w.put_str(&self.id_number, ID_NUMBER_LEN);
        w.put_str(&self.registration_date, DATE_LEN);
        w.put_u32(self.total_stays);
        w.put_f64(self.total_spent);
        w.put_u8(self.vip_status.as_u8());
        w.put_str(&self.notes, NOTES_LEN);
        w.put_bool(self.is_active);
    }

    fn decode(buf: &[u8]) -> Result<Self, DecodeError> {
        let mut r = FieldReader::new(buf);
        Ok(Guest {
            id: r.take_u32(),
            name: r.take_str(NAME_LEN),
            address: r.take_str(ADDRESS_LEN),
            phone: r.take_str(PHONE_LEN),
            email: r.take_str(EMAIL_LEN),
            id_type: r.take_str(ID_TYPE_LEN),
            id_number: r.take_str(ID_NUMBER_LEN),
            registration_date: r.take_str(DATE_LEN),
            total_stays: r.take_u32(),
            total_spent: r.take_f64(),
            vip_status: r.take_tag("vip_status", VipStatus::from_u8)?,
            notes: r.take_str(NOTES_LEN),
            is_active: r.take_bool(),
        })
    }

    fn id(&self) -> u32 {
        self.id
    }

    fn is_active(&self) -> bool {
        self.is_active
    }
}

// =============================================================================
// Reservation
// =============================================================================

impl FixedRecord for Reservation {
    // id 4 + guest 4 + room 4 + check_in 10 + check_out 10 + status 1
    //   + num_guests 4 + total 8 + paid 8 + created_at 19 + created_by 4
    //   + notes 200 + active 1
    const RECORD_SIZE: usize =
        4 + 4 + 4 + DATE_LEN + DATE_LEN + 1 + 4 + 8 + 8 + TIMESTAMP_LEN + 4 + NOTES_LEN + 1;
    const ENTITY: &'static str = "reservation";

    fn encode(&self, buf: &mut [u8]) {
        let mut w = FieldWriter::new(buf);
        w.put_u32(self.id);
        w.put_u32(self.guest_id);
        w.put_u32(self.room_id);
        w.put_str(&self.check_in, DATE_LEN);
        w.put_str(&self.check_out, DATE_LEN);
        w.put_u8(self.status.as_u8());
        w.put_u32(self.num_guests);
        w.put_f64(self.total_amount);
        w.put_f64(self.paid_amount);
        w.put_str(&self.created_at, TIMESTAMP_LEN);
        w.put_u32(self.created_by);
        w.put_str(&self.notes, NOTES_LEN);
        w.put_bool(self.is_active);
    }

    fn decode(buf: &[u8]) -> Result<Self, DecodeError> {
        let mut r = FieldReader::new(buf);
        Ok(Reservation {
            id: r.take_u32(),
            guest_id: r.take_u32(),
            room_id: r.take_u32(),
            check_in: r.take_str(DATE_LEN),
            check_out: r.take_str(DATE_LEN),
            status: r.take_tag("status", ReservationStatus::from_u8)?,
            num_guests: r.take_u32(),
            total_amount: r.take_f64(),
            paid_amount: r.take_f64(),
            created_at: r.take_str(TIMESTAMP_LEN),
            created_by: r.take_u32(),
            notes: r.take_str(NOTES_LEN),
            is_active: r.take_bool(),
        })
    }

    fn id(&self) -> u32 {
        self.id
    }

    fn is_active(&self) -> bool {
        self.is_active
    }
}

// =============================================================================
// Invoice
// =============================================================================

impl FixedRecord for Invoice {
    // id 4 + guest 4 + reservation 4 + issue 10 + due 10 + 5 amounts 40
    //   + status 1 + notes 200 + created_by 4 + active 1
    const RECORD_SIZE: usize = 4 + 4 + 4 + DATE_LEN + DATE_LEN + 40 + 1 + NOTES_LEN + 4 + 1;
    const ENTITY: &'static str = "invoice";

    fn encode(&self, buf: &mut [u8]) {
        let mut w = FieldWriter::new(buf);
        w.put_u32(self.id);
        w.put_u32(self.guest_id);
        w.put_u32(self.reservation_id);
        w.put_str(&self.issue_date, DATE_LEN);
        w.put_str(&self.due_date, DATE_LEN);
        w.put_f64(self.subtotal);
        w.put_f64(self.tax_amount);
        w.put_f64(self.discount_amount);
        w.put_f64(self.total_amount);
        w.put_f64(self.paid_amount);
        w.put_u8(self.status.as_u8());
        w.put_str(&self.notes, NOTES_LEN);
        w.put_u32(self.created_by);
        w.put_bool(self.is_active);
    }

    fn decode(buf: &[u8]) -> Result<Self, DecodeError> {
        let mut r = FieldReader::new(buf);
        Ok(Invoice {
            id: r.take_u32(),
            guest_id: r.take_u32(),
            reservation_id: r.take_u32(),
            issue_date: r.take_str(DATE_LEN),
            due_date: r.take_str(DATE_LEN),
            subtotal: r.take_f64(),
            tax_amount: r.take_f64(),
            discount_amount: r.take_f64(),
            total_amount: r.take_f64(),
            paid_amount: r.take_f64(),
            status: r.take_tag("status", InvoiceStatus::from_u8)?,
            notes: r.take_str(NOTES_LEN),
            created_by: r.take_u32(),
            is_active: r.take_bool(),
        })
    }

    fn id(&self) -> u32 {
        self.id
    }

    fn is_active(&self) -> bool {
        self.is_active
    }
}

// =============================================================================
// Billing Item
// =============================================================================

impl FixedRecord for BillingItem {
    // id 4 + invoice 4 + type 1 + description 100 + unit_price 8
    //   + quantity 4 + amount 8 + active 1
    const RECORD_SIZE: usize = 4 + 4 + 1 + DESCRIPTION_LEN + 8 + 4 + 8 + 1;
    const ENTITY: &'static str = "billing item";

    fn encode(&self, buf: &mut [u8]) {
        let mut w = FieldWriter::new(buf);
        w.put_u32(self.id);
        w.put_u32(self.invoice_id);
        w.put_u8(self.item_type.as_u8());
        w.put_str(&self.description, DESCRIPTION_LEN);
        w.put_f64(self.unit_price);
        w.put_u32(self.quantity);
        w.put_f64(self.amount);
        w.put_bool(self.is_active);
    }

    fn decode(buf: &[u8]) -> Result<Self, DecodeError> {
        let mut r = FieldReader::new(buf);
        Ok(BillingItem {
            id: r.take_u32(),
            invoice_id: r.take_u32(),
            item_type: r.take_tag("item_type", BillingItemType::from_u8)?,
            description: r.take_str(DESCRIPTION_LEN),
            unit_price: r.take_f64(),
            quantity: r.take_u32(),
            amount: r.take_f64(),
            is_active: r.take_bool(),
        })
    }

    fn id(&self) -> u32 {
        self.id
    }

    fn is_active(&self) -> bool {
        self.is_active
    }
}

// =============================================================================
// Payment
// =============================================================================

impl FixedRecord for Payment {
    // id 4 + invoice 4 + method 1 + status 1 + amount 8 + date 10
    //   + transaction_id 50 + notes 200 + created_by 4 + active 1
    const RECORD_SIZE: usize = 4 + 4 + 1 + 1 + 8 + DATE_LEN + TRANSACTION_ID_LEN + NOTES_LEN + 4 + 1;
    const ENTITY: &'static str = "payment";

    fn encode(&self, buf: &mut [u8]) {
        let mut w = FieldWriter::new(buf);
        w.put_u32(self.id);
        w.put_u32(self.invoice_id);
        w.put_u8(self.method.as_u8());
        w.put_u8(self.status.as_u8());
        w.put_f64(self.amount);
        w.put_str(&self.transaction_date, DATE_LEN);
        w.put_str(&self.transaction_id, TRANSACTION_ID_LEN);
        w.put_str(&self.notes, NOTES_LEN);
        w.put_u32(self.created_by);
        w.put_bool(self.is_active);
    }

    fn decode(buf: &[u8]) -> Result<Self, DecodeError> {
        let mut r = FieldReader::new(buf);
        Ok(Payment {
            id: r.take_u32(),
            invoice_id: r.take_u32(),
            method: r.take_tag("method", PaymentMethod::from_u8)?,
            status: r.take_tag("status", PaymentStatus::from_u8)?,
            amount: r.take_f64(),
            transaction_date: r.take_str(DATE_LEN),
            transaction_id: r.take_str(TRANSACTION_ID_LEN),
            notes: r.take_str(NOTES_LEN),
            created_by: r.take_u32(),
            is_active: r.take_bool(),
        })
    }

    fn id(&self) -> u32 {
        self.id
    }

    fn is_active(&self) -> bool {
        self.is_active
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn round_trip<R: FixedRecord + PartialEq + std::fmt::Debug>(record: &R) -> R {
        let mut buf = vec![0u8; R::RECORD_SIZE];
        record.encode(&mut buf);
        R::decode(&buf).expect("decode")
    }

    fn sample_room() -> Room {
        Room {
            id: 101,
            room_type: RoomType::Deluxe,
            status: RoomStatus::Available,
            rate: 149.5,
            capacity: 2,
            floor: 1,
            description: "Corner room with a view".to_string(),
            features: "WiFi, Minibar, Balcony".to_string(),
            is_active: true,
        }
    }

    #[test]
    fn user_round_trips() {
        let user = User {
            id: 3,
            username: "frontdesk".to_string(),
            password_hash: "229465095248369".to_string(),
            full_name: "Front Desk".to_string(),
            role: UserRole::Staff,
            last_login: "2024-01-05 09:30:00".to_string(),
            is_active: true,
        };
        assert_eq!(round_trip(&user), user);
    }

    #[test]
    fn room_round_trips() {
        let room = sample_room();
        assert_eq!(round_trip(&room), room);
    }

    #[test]
    fn guest_round_trips_with_empty_fields() {
        let guest = Guest {
            id: 7,
            name: "Grace Hopper".to_string(),
            address: String::new(),
            phone: "555-0100".to_string(),
            email: String::new(),
            id_type: "Passport".to_string(),
            id_number: "P1234567".to_string(),
            registration_date: "2024-01-02".to_string(),
            total_stays: 0,
            total_spent: 0.0,
            vip_status: VipStatus::Regular,
            notes: String::new(),
            is_active: true,
        };
        assert_eq!(round_trip(&guest), guest);
    }

    #[test]
    fn reservation_round_trips() {
        let reservation = Reservation {
            id: 12,
            guest_id: 7,
            room_id: 101,
            check_in: "2024-03-01".to_string(),
            check_out: "2024-03-04".to_string(),
            status: ReservationStatus::Confirmed,
            num_guests: 2,
            total_amount: 448.5,
            paid_amount: 100.0,
            created_at: "2024-02-20 14:05:33".to_string(),
            created_by: 1,
            notes: "Late arrival".to_string(),
            is_active: true,
        };
        assert_eq!(round_trip(&reservation), reservation);
    }

    #[test]
    fn invoice_round_trips() {
        let invoice = Invoice {
            id: 4,
            guest_id: 7,
            reservation_id: 12,
            issue_date: "2024-03-01".to_string(),
            due_date: "2024-03-08".to_string(),
            subtotal: 448.5,
            tax_amount: 44.85,
            discount_amount: 0.0,
            total_amount: 493.35,
            paid_amount: 100.0,
            status: InvoiceStatus::Issued,
            notes: String::new(),
            created_by: 1,
            is_active: true,
        };
        assert_eq!(round_trip(&invoice), invoice);
    }

    #[test]
    fn billing_item_round_trips() {
        let item = BillingItem {
            id: 9,
            invoice_id: 4,
            item_type: BillingItemType::Minibar,
            description: "Minibar restock".to_string(),
            unit_price: 12.5,
            quantity: 3,
            amount: 37.5,
            is_active: true,
        };
        assert_eq!(round_trip(&item), item);
    }

    #[test]
    fn payment_round_trips() {
        let payment = Payment {
            id: 2,
            invoice_id: 4,
            method: PaymentMethod::CreditCard,
            status: PaymentStatus::Completed,
            amount: 100.0,
            transaction_date: "2024-03-01".to_string(),
            transaction_id: "d3f1a2b4".to_string(),
            notes: "Deposit".to_string(),
            created_by: 1,
            is_active: false,
        };
        assert_eq!(round_trip(&payment), payment);
    }

    #[test]
    fn encode_fills_entire_record() {
        let room = sample_room();
        let mut buf = vec![0xAAu8; Room::RECORD_SIZE];
        room.encode(&mut buf);
        // Every byte is either real data or NUL padding; no 0xAA survives
        // inside string fields.
        let decoded = Room::decode(&buf).unwrap();
        assert_eq!(decoded.description, room.description);
        assert_eq!(decoded.features, room.features);
    }

    #[test]
    fn oversized_strings_truncate_silently() {
        let mut room = sample_room();
        room.description = "x".repeat(500);
        let decoded = round_trip(&room);
        assert_eq!(decoded.description.len(), 100);
        assert_eq!(decoded.description, "x".repeat(100));
    }

    #[test]
    fn truncation_respects_char_boundaries() {
        let mut guest = Guest {
            id: 1,
            name: String::new(),
            address: String::new(),
            phone: String::new(),
            email: String::new(),
            id_type: String::new(),
            id_number: String::new(),
            registration_date: "2024-01-01".to_string(),
            total_stays: 0,
            total_spent: 0.0,
            vip_status: VipStatus::Regular,
            notes: String::new(),
            is_active: true,
        };
        // 49 ASCII bytes then a 2-byte char: it cannot fit in 50, so the
        // truncated value must stop at the boundary, not split the char.
        guest.name = format!("{}é", "a".repeat(49));
        let decoded = round_trip(&guest);
        assert_eq!(decoded.name, "a".repeat(49));
    }

    #[test]
    fn unknown_enum_tag_is_a_decode_error() {
        let room = sample_room();
        let mut buf = vec![0u8; Room::RECORD_SIZE];
        room.encode(&mut buf);
        buf[4] = 200; // room_type tag
        let err = Room::decode(&buf).unwrap_err();
        assert_eq!(err.field, "room_type");
        assert_eq!(err.value, 200);
    }

    #[test]
    fn writer_advances_exactly_record_size() {
        let room = sample_room();
        let mut buf = vec![0u8; Room::RECORD_SIZE];
        let mut w = FieldWriter::new(&mut buf);
        w.put_u32(room.id);
        w.put_u8(room.room_type.as_u8());
        w.put_u8(room.status.as_u8());
        w.put_f64(room.rate);
        w.put_u32(room.capacity);
        w.put_u32(room.floor);
        w.put_str(&room.description, 100);
        w.put_str(&room.features, 200);
        w.put_bool(room.is_active);
        assert_eq!(w.written(), Room::RECORD_SIZE);
    }
}
