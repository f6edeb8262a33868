/*
 The reference table holds one calibrated pulse per channel in a tab separated text file in the
 working directory. Every operation loads the whole file, works on the ordered entries and writes
 the whole file back. There is no locking, two processes writing at once can clobber each other.
 */

use std::fs;
use std::path::{Path, PathBuf};
use serde::Serialize;
use tracing::{debug, info};
use crate::calculator::frequency_from_length;
use crate::channel::Channel;
use crate::error::{require_positive, PulseCalcError, Result};

pub const TABLE_FILE_NAME:&str = "reference_pulses.csv";
pub const TABLE_HEADER:&str = "Channel\tLength (μs)\tPower (W)\tFrequency (kHz)";
const N_FIELDS:usize = 4;

#[derive(Clone,Copy,Debug,PartialEq,Serialize)]
pub struct ReferencePulse {
    pub channel:Channel,
    /// us
    pub length:f64,
    /// W
    pub power:f64,
    /// kHz
    pub frequency:f64,
}

impl ReferencePulse {

    /// values are rounded to the two decimals the table stores and must stay positive after that
    pub fn new(channel:Channel,length:f64,power:f64,frequency:f64) -> Result<Self> {
        Ok(Self {
            channel,
            length:require_positive("pulse length",round_stored(length))?,
            power:require_positive("pulse power",round_stored(power))?,
            frequency:require_positive("pulse frequency",round_stored(frequency))?,
        })
    }

    /// reference pulse with the frequency derived from its length
    pub fn from_length(channel:Channel,length:f64,power:f64) -> Result<Self> {
        let frequency = frequency_from_length(length)?;
        Self::new(channel,length,power,frequency)
    }

    fn to_line(&self) -> String {
        format!("{}\t{:.2}\t{:.2}\t{:.2}",self.channel,self.length,self.power,self.frequency)
    }

    fn from_line(line:&str,line_number:usize) -> Result<Self> {
        let corrupt = |reason:String| PulseCalcError::Corrupt{line:line_number,reason};
        let fields:Vec<&str> = line.split('\t').map(|f| f.trim()).collect();
        if fields.len() != N_FIELDS {
            return Err(corrupt(format!("expected {} fields, found {}",N_FIELDS,fields.len())));
        }
        let channel:Channel = fields[0].parse().map_err(|e:PulseCalcError| corrupt(e.to_string()))?;
        let mut values = [0.0;3];
        for (value,field) in values.iter_mut().zip(&fields[1..]) {
            *value = field.parse().map_err(|_| corrupt(format!("cannot parse {:?} as a number",field)))?;
        }
        Self::new(channel,values[0],values[1],values[2]).map_err(|e| corrupt(e.to_string()))
    }
}

fn round_stored(value:f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Entries of the table in file order, at most one per channel
#[derive(Clone,Debug,Default,PartialEq)]
pub struct ReferenceEntries {
    entries:Vec<ReferencePulse>
}

impl ReferenceEntries {

    pub fn new() -> Self {
        Self::default()
    }

    /// overwrites the entry for the channel in place, or appends it. Returns true on overwrite
    pub fn upsert(&mut self,pulse:ReferencePulse) -> bool {
        match self.entries.iter_mut().find(|e| e.channel == pulse.channel) {
            Some(existing) => {
                *existing = pulse;
                true
            }
            None => {
                self.entries.push(pulse);
                false
            }
        }
    }

    pub fn get(&self,channel:Channel) -> Option<&ReferencePulse> {
        self.entries.iter().find(|e| e.channel == channel)
    }

    pub fn iter(&self) -> impl Iterator<Item=&ReferencePulse> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn into_vec(self) -> Vec<ReferencePulse> {
        self.entries
    }

    pub fn to_txt(&self) -> String {
        let mut strbuf = String::from(TABLE_HEADER);
        strbuf.push('\n');
        for pulse in self.entries.iter() {
            strbuf.push_str(&pulse.to_line());
            strbuf.push('\n');
        }
        strbuf
    }

    pub fn from_txt(txt:&str) -> Result<Self> {
        let mut entries = Self::new();
        // first line is the header
        for (index,line) in txt.lines().enumerate().skip(1) {
            if line.trim().is_empty() {
                continue;
            }
            entries.upsert(ReferencePulse::from_line(line,index + 1)?);
        }
        Ok(entries)
    }
}

pub struct ReferenceTable {
    file:PathBuf
}

impl ReferenceTable {

    pub fn in_dir(dir:&Path) -> Self {
        Self {
            file:dir.join(TABLE_FILE_NAME)
        }
    }

    pub fn current_dir() -> Result<Self> {
        Ok(Self::in_dir(&std::env::current_dir()?))
    }

    pub fn path(&self) -> &Path {
        &self.file
    }

    pub fn exists(&self) -> bool {
        self.file.exists()
    }

    /// writes an empty table. An existing table is only replaced when the overwrite is confirmed
    pub fn create(&self,confirmed:bool) -> Result<()> {
        if self.exists() {
            if !confirmed {
                return Err(PulseCalcError::AlreadyExists(self.file.clone()));
            }
            fs::remove_file(&self.file)?;
            info!("removed existing reference table {:?}",self.file);
        }
        self.save(&ReferenceEntries::new())?;
        info!("created reference table {:?}",self.file);
        Ok(())
    }

    pub fn get(&self,channel:Channel) -> Result<Option<ReferencePulse>> {
        Ok(self.load()?.get(channel).copied())
    }

    pub fn get_all(&self) -> Result<Vec<ReferencePulse>> {
        Ok(self.load()?.into_vec())
    }

    pub fn upsert(&self,channel:Channel,length:f64,power:f64,frequency:f64) -> Result<()> {
        let pulse = ReferencePulse::new(channel,length,power,frequency)?;
        let mut entries = self.load()?;
        match entries.upsert(pulse) {
            true => info!("updated {} reference pulse",channel),
            false => info!("added {} reference pulse",channel),
        }
        self.save(&entries)
    }

    /// removes the table if confirmed. Returns false when the removal was declined
    pub fn reset(&self,confirmed:bool) -> Result<bool> {
        if !self.exists() {
            return Err(PulseCalcError::NotFound(self.file.clone()));
        }
        if !confirmed {
            debug!("reset of {:?} declined",self.file);
            return Ok(false);
        }
        fs::remove_file(&self.file)?;
        info!("removed reference table {:?}",self.file);
        Ok(true)
    }

    fn load(&self) -> Result<ReferenceEntries> {
        if !self.exists() {
            return Err(PulseCalcError::NotFound(self.file.clone()));
        }
        debug!("reading reference table {:?}",self.file);
        let txt = fs::read_to_string(&self.file)?;
        ReferenceEntries::from_txt(&txt)
    }

    fn save(&self,entries:&ReferenceEntries) -> Result<()> {
        debug!("writing {} entries to {:?}",entries.len(),self.file);
        fs::write(&self.file,entries.to_txt())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn table() -> (TempDir,ReferenceTable) {
        let dir = TempDir::new().unwrap();
        let table = ReferenceTable::in_dir(dir.path());
        (dir,table)
    }

    #[test]
    fn current_dir_table_uses_fixed_name() {
        let table = ReferenceTable::current_dir().unwrap();
        assert_eq!(table.path().file_name().unwrap(), TABLE_FILE_NAME);
        assert_eq!(table.path().parent().unwrap(), std::env::current_dir().unwrap());
    }

    #[test]
    fn create_writes_header_only() {
        let (_dir,table) = table();
        assert!(!table.exists());
        table.create(false).unwrap();
        assert!(table.exists());
        let txt = fs::read_to_string(table.path()).unwrap();
        assert_eq!(txt, "Channel\tLength (μs)\tPower (W)\tFrequency (kHz)\n");
        assert!(table.get_all().unwrap().is_empty());
    }

    #[test]
    fn create_over_existing_requires_confirmation() {
        let (_dir,table) = table();
        table.create(false).unwrap();
        table.upsert(Channel::H1, 5.0, 100.0, 50.0).unwrap();
        let before = fs::read_to_string(table.path()).unwrap();

        let err = table.create(false).unwrap_err();
        assert!(matches!(err, PulseCalcError::AlreadyExists(_)));
        assert_eq!(fs::read_to_string(table.path()).unwrap(), before);

        table.create(true).unwrap();
        assert!(table.get_all().unwrap().is_empty());
    }

    #[test]
    fn operations_on_missing_table_fail() {
        let (_dir,table) = table();
        assert!(matches!(table.get(Channel::H1), Err(PulseCalcError::NotFound(_))));
        assert!(matches!(table.get_all(), Err(PulseCalcError::NotFound(_))));
        assert!(matches!(table.upsert(Channel::H1, 5.0, 100.0, 50.0), Err(PulseCalcError::NotFound(_))));
        assert!(matches!(table.reset(true), Err(PulseCalcError::NotFound(_))));
        assert!(!table.exists());
    }

    #[test]
    fn values_are_written_with_two_decimals() {
        let (_dir,table) = table();
        table.create(false).unwrap();
        table.upsert(Channel::C13, 3.456, 250.0, 72.3379).unwrap();
        let txt = fs::read_to_string(table.path()).unwrap();
        assert_eq!(txt.lines().nth(1).unwrap(), "13C\t3.46\t250.00\t72.34");
        let pulse = table.get(Channel::C13).unwrap().unwrap();
        assert_eq!(pulse.length, 3.46);
        assert_eq!(pulse.frequency, 72.34);
    }

    #[test]
    fn upsert_rejects_non_positive_values() {
        let (_dir,table) = table();
        table.create(false).unwrap();
        assert!(matches!(table.upsert(Channel::H1, 0.0, 100.0, 50.0), Err(PulseCalcError::InvalidArgument { .. })));
        assert!(matches!(table.upsert(Channel::H1, 5.0, -1.0, 50.0), Err(PulseCalcError::InvalidArgument { .. })));
        assert!(table.get_all().unwrap().is_empty());
    }

    #[test]
    fn upsert_rejects_values_that_round_to_zero() {
        let (_dir,table) = table();
        table.create(false).unwrap();
        let err = table.upsert(Channel::H1, 5.0, 0.004, 50.0).unwrap_err();
        assert!(matches!(err, PulseCalcError::InvalidArgument { name: "pulse power", .. }));
        let err = table.upsert(Channel::C13, 1E6, 100.0, frequency_from_length(1E6).unwrap()).unwrap_err();
        assert!(matches!(err, PulseCalcError::InvalidArgument { name: "pulse frequency", .. }));
        assert!(table.get_all().unwrap().is_empty());

        table.upsert(Channel::H1, 5.0, 0.005, 50.0).unwrap();
        assert_eq!(table.get(Channel::H1).unwrap().unwrap().power, 0.01);
    }

    #[test]
    fn reset_declined_keeps_table() {
        let (_dir,table) = table();
        table.create(false).unwrap();
        assert!(!table.reset(false).unwrap());
        assert!(table.exists());
        assert!(table.reset(true).unwrap());
        assert!(!table.exists());
    }

    #[test]
    fn entries_upsert_keeps_position() {
        let mut entries = ReferenceEntries::new();
        assert!(!entries.upsert(ReferencePulse::from_length(Channel::H1, 5.0, 100.0).unwrap()));
        assert!(!entries.upsert(ReferencePulse::from_length(Channel::C13, 4.0, 200.0).unwrap()));
        assert!(entries.upsert(ReferencePulse::from_length(Channel::H1, 2.5, 300.0).unwrap()));
        let v = entries.into_vec();
        assert_eq!(v.len(), 2);
        assert_eq!(v[0].channel, Channel::H1);
        assert_eq!(v[0].length, 2.5);
        assert_eq!(v[0].frequency, 100.0);
        assert_eq!(v[1].channel, Channel::C13);
    }

    #[test]
    fn parse_reports_corrupt_lines() {
        let txt = format!("{}\n1H\t5.00\t100.00\t50.00\n13C\t4.00\tabc\t62.50\n",TABLE_HEADER);
        let err = ReferenceEntries::from_txt(&txt).unwrap_err();
        assert!(matches!(err, PulseCalcError::Corrupt { line: 3, .. }));

        let txt = format!("{}\n1H\t5.00\t100.00\n",TABLE_HEADER);
        assert!(matches!(ReferenceEntries::from_txt(&txt), Err(PulseCalcError::Corrupt { line: 2, .. })));

        let txt = format!("{}\n31P\t5.00\t100.00\t50.00\n",TABLE_HEADER);
        assert!(matches!(ReferenceEntries::from_txt(&txt), Err(PulseCalcError::Corrupt { line: 2, .. })));

        for bad in ["NaN", "-1.00", "0.00", "inf"] {
            let txt = format!("{}\n1H\t5.00\t{}\t50.00\n",TABLE_HEADER,bad);
            let err = ReferenceEntries::from_txt(&txt).unwrap_err();
            assert!(matches!(err, PulseCalcError::Corrupt { line: 2, ref reason } if reason.contains("pulse power")), "{}", bad);
        }
    }

    #[test]
    fn parse_tolerates_blank_lines_and_crlf() {
        let txt = format!("{}\r\n1H\t5.00\t100.00\t50.00\r\n\r\n15N\t8.00\t400.00\t31.25\r\n",TABLE_HEADER);
        let entries = ReferenceEntries::from_txt(&txt).unwrap();
        let channels:Vec<Channel> = entries.iter().map(|p| p.channel).collect();
        assert_eq!(channels, vec![Channel::H1, Channel::N15]);
        assert_eq!(entries.get(Channel::N15).unwrap().power, 400.0);
    }
}
